use lazy_static::lazy_static;
use prometheus::{IntCounter, IntGauge, Registry};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref ROUNDS_PLAYED: IntCounter =
        IntCounter::new("quickdraw_rounds_played", "Rounds started since the game began")
            .expect("metric cannot be created");
    pub static ref EARLY_PRESSES: IntCounter =
        IntCounter::new("quickdraw_early_presses", "Rounds lost by pressing too early")
            .expect("metric cannot be created");
    pub static ref CONNECTED_PLAYERS: IntGauge =
        IntGauge::new("quickdraw_connected_players", "Amount of players connected")
            .expect("metric cannot be created");
}

pub fn register_metrics() {
    REGISTRY
        .register(Box::new(ROUNDS_PLAYED.clone()))
        .expect("collector cannot be registered");

    REGISTRY
        .register(Box::new(EARLY_PRESSES.clone()))
        .expect("collector cannot be registered");

    REGISTRY
        .register(Box::new(CONNECTED_PLAYERS.clone()))
        .expect("collector cannot be registered");
}
