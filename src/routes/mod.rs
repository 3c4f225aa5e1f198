use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::game::actor_client::GameClient;

mod game;
mod health;
mod metrics;

pub struct AppState {
    pub game: GameClient,
    pub player_inactivity_timeout: Duration,
}

pub fn create_router(config: &Config) -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::get))
        .route("/metrics", get(metrics::metrics_handler))
        .route("/game", get(game::get_state))
        .route("/game/start", post(game::start))
        .route(
            "/game/player/:nickname/ws",
            get(game::connect_player_to_websocket),
        )
        .layer(if config.allow_cors {
            log::info!("CorsLayer Permissive");
            CorsLayer::permissive()
        } else {
            CorsLayer::default()
        })
}
