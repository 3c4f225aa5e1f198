use axum::extract::ws::{Message, WebSocket};
use std::time::Duration;
use tokio::select;
use tokio::time::error::Elapsed;
use tokio::time::timeout;

use crate::error::Error;
use crate::game::actor::GameWideEvent;
use crate::game::actor_client::GameClient;
use crate::game::actor_client::GameWideEventReceiver;
use crate::metrics::CONNECTED_PLAYERS;
use crate::round::buttons::Press;
use crate::websocket::close;
use crate::websocket::message::WsMessageIn;
use crate::websocket::message::WsMessageOut;
use crate::websocket::parse_message;
use crate::websocket::send_error;
use crate::websocket::send_message;
use crate::websocket::send_message_string;

/// Bridges one player's WebSocket (their button and their display) with the game.
pub struct PlayerActor {
    nickname: String,
    game: GameClient,
    game_wide_event_receiver: GameWideEventReceiver,
    websocket: WebSocket,
    inactivity_timeout: Duration,
}

impl PlayerActor {
    pub async fn create(
        nickname: String,
        game: GameClient,
        mut websocket: WebSocket,
        inactivity_timeout: Duration,
    ) {
        match game.add_player(&nickname).await {
            Ok(game_wide_event_receiver) => {
                PlayerActor {
                    nickname,
                    game,
                    game_wide_event_receiver,
                    websocket,
                    inactivity_timeout,
                }
                .start()
                .await
            }
            Err(error) => {
                send_error(&mut websocket, &error).await;
                close(websocket).await;
            }
        }
    }

    async fn start(mut self) {
        CONNECTED_PLAYERS.inc();

        loop {
            select! {
                game_wide_message = self.game_wide_event_receiver.next() => {
                    if let Err(error) = self.receive_game_wide_message(game_wide_message).await {
                        send_error(&mut self.websocket, &error).await;
                        if PlayerActor::should_close_websocket(&error) {
                            break;
                        }
                    }
                },
                websocket_message = timeout(self.inactivity_timeout, self.websocket.recv()) => {
                    if let Err(error) = self.receive_websocket_message(websocket_message).await {
                        send_error(&mut self.websocket, &error).await;
                        if PlayerActor::should_close_websocket(&error) {
                            break;
                        }
                    }
                },
            }
        }

        let _ = self.game.remove_player(&self.nickname).await;
        close(self.websocket).await;
        CONNECTED_PLAYERS.dec();
    }

    fn should_close_websocket(error: &Error) -> bool {
        match error {
            Error::Internal(_) => true,
            Error::WebsocketClosed(_) => true,
            Error::UnprocessableMessage(_, _) => false,
            Error::Domain(_) => false,
        }
    }

    async fn receive_game_wide_message(
        &mut self,
        game_wide_message: Result<GameWideEvent, Error>,
    ) -> Result<(), Error> {
        match game_wide_message {
            Ok(GameWideEvent::GameState { snapshot }) => {
                send_message(&mut self.websocket, &WsMessageOut::GameState(snapshot.into())).await
            }
            Err(error) => Err(error),
        }
    }

    async fn receive_websocket_message(
        &mut self,
        websocket_message: Result<Option<Result<Message, axum::Error>>, Elapsed>,
    ) -> Result<(), Error> {
        match websocket_message {
            Ok(Some(Ok(Message::Text(txt)))) => match txt.as_str() {
                "ping" => send_message_string(&mut self.websocket, "pong").await,
                message => match parse_message(message)? {
                    WsMessageIn::StartGame => {
                        self.game.start_game().await?;
                        log::info!("Player {} asked to start the game.", self.nickname);
                        Ok(())
                    }
                    WsMessageIn::PressButton => {
                        if self.game.press_button(&self.nickname).await? == Press::Ignored {
                            log::debug!(
                                "Player {} pressed the button while no round was listening.",
                                self.nickname
                            );
                        }
                        Ok(())
                    }
                },
            },
            // browser said "close"
            Ok(Some(Ok(Message::Close(_)))) => {
                self.log_connection_lost_with_player("browser sent 'Close' websocket frame");
                Err(Error::WebsocketClosed(
                    "browser sent 'Close' websocket frame".to_string(),
                ))
            }
            // websocket was closed
            Ok(None) => {
                self.log_connection_lost_with_player("other end of websocket was closed abruptly");
                Err(Error::WebsocketClosed(
                    "other end of websocket was closed abruptly".to_string(),
                ))
            }
            // timeout without receiving anything from player
            Err(_) => {
                self.log_connection_lost_with_player(
                    "connection timed out; missing 'Ping' messages",
                );
                Err(Error::WebsocketClosed(
                    "connection timed out; missing 'Ping' messages".to_string(),
                ))
            }
            Ok(Some(Err(error))) => Err(Error::UnprocessableMessage(
                error.to_string(),
                "Message cannot be loaded".to_string(),
            )),
            Ok(Some(Ok(_))) => Err(Error::UnprocessableMessage(
                "Unsupported message type".to_string(),
                "Unsupported message type".to_string(),
            )),
        }
    }

    fn log_connection_lost_with_player(&self, reason: &str) {
        log::info!(
            "Connection with player {} lost due to: {}. Stopping player actor.",
            &self.nickname,
            reason,
        );
    }
}
