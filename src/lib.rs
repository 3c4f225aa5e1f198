pub mod config;
pub mod error;
pub mod game;
pub mod metrics;
pub mod player;
pub mod round;
mod routes;
pub mod startup;
mod websocket;
