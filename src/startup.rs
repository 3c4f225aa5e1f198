use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::error::Error;
use crate::game::actor::GameActor;
use crate::routes::{self, AppState};

pub async fn create_web_server(config: Config, listener: TcpListener) -> Result<(), Error> {
    let game = GameActor::spawn(config.game.clone())?;
    let state = Arc::new(AppState {
        game: game.clone(),
        player_inactivity_timeout: config.game.player_inactivity_timeout(),
    });

    let router = routes::create_router(&config).with_state(state);

    match listener.local_addr() {
        Ok(address) => log::info!("Listening on {address}"),
        Err(error) => log::warn!("Could not read the listening address. Error: '{error}'."),
    }
    let result = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|error| {
            Error::log_and_create_internal(&format!("The web server failed. Error: '{error}'."))
        });

    let _ = game.shutdown().await;
    result
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        log::error!("Could not listen for the shutdown signal. Error: '{error}'.");
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received.");
}
