use std::sync::Arc;

use axum::extract::{Path, State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::Error;
use crate::player::actor::PlayerActor;
use crate::routes::AppState;
use crate::websocket::error_to_ws_error;
use crate::websocket::message::GameStateDto;

pub async fn get_state(State(state): State<Arc<AppState>>) -> Response {
    match state.game.get_state().await {
        Ok(snapshot) => (StatusCode::OK, Json(GameStateDto::from(snapshot))).into_response(),
        Err(error) => internal_error(error),
    }
}

pub async fn start(State(state): State<Arc<AppState>>) -> Response {
    match state.game.start_game().await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(error) => internal_error(error),
    }
}

pub async fn connect_player_to_websocket(
    State(state): State<Arc<AppState>>,
    Path(nickname): Path<String>,
    websocket_upgrade: WebSocketUpgrade,
) -> Response {
    websocket_upgrade.on_upgrade(move |websocket| async move {
        PlayerActor::create(
            nickname,
            state.game.clone(),
            websocket,
            state.player_inactivity_timeout,
        )
        .await
    })
}

fn internal_error(error: Error) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(error_to_ws_error(&error)),
    )
        .into_response()
}
