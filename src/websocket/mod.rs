pub mod message;

use axum::extract::ws::{Message, WebSocket};
use serde::Serialize;

use crate::error::domain_error::DomainError;
use crate::error::Error;
use message::WsMessageIn;
use message::WsMessageOut;

pub async fn send_error(websocket: &mut WebSocket, error: &Error) {
    if let Err(closed_error) = send_message(websocket, &error_to_ws_error(error)).await {
        log::error!("Sent Error '{error}' to the browser but the WebSocket is closed. Error: '{closed_error}'.");
    }
}

pub async fn close(websocket: WebSocket) {
    if let Err(error) = websocket.close().await {
        log::error!("Could not close WebSocket. Error: '{error}'.")
    }
}

pub fn parse_message(message: &str) -> Result<WsMessageIn, Error> {
    serde_json::from_str(message)
        .map_err(|error| Error::UnprocessableMessage(error.to_string(), message.to_string()))
}

pub async fn send_message<T>(websocket: &mut WebSocket, value: &T) -> Result<(), Error>
where
    T: ?Sized + Serialize,
{
    let message = serde_json::to_string(value).map_err(|error| {
        Error::log_and_create_internal(&format!(
            "Could not serialize the message. Error: '{error}'."
        ))
    })?;

    send_message_string(websocket, &message).await
}

pub async fn send_message_string(websocket: &mut WebSocket, message: &str) -> Result<(), Error> {
    websocket
        .send(Message::Text(message.to_string()))
        .await
        .map_err(|error| Error::WebsocketClosed(error.to_string()))
}

pub(crate) fn error_to_ws_error(error: &Error) -> WsMessageOut {
    let (r#type, title) = match error {
        Error::Domain(DomainError::PlayerDoesNotExist(_)) => {
            ("PLAYER_DOES_NOT_EXIST", "The player is not part of this game")
        }
        Error::Domain(DomainError::PlayerAlreadyConnected(_)) => {
            ("PLAYER_ALREADY_CONNECTED", "The player is already connected")
        }
        Error::Domain(DomainError::NoPlayersConfigured)
        | Error::Domain(DomainError::DuplicatedPlayer(_))
        | Error::Domain(DomainError::InvalidDelayRange(_, _)) => {
            ("INVALID_GAME_CONFIGURATION", "The game is misconfigured")
        }
        Error::Internal(_) => ("INTERNAL_SERVER", "Internal Server error"),
        Error::UnprocessableMessage(_, _) => {
            ("UNPROCESSABLE_WEBSOCKET_MESSAGE", "Unprocessable websocket message")
        }
        Error::WebsocketClosed(_) => ("WEBSOCKET_CLOSED", "The player websocket is closed"),
    };
    WsMessageOut::Error {
        r#type: r#type.to_string(),
        title: title.to_string(),
        detail: error.to_string(),
    }
}
