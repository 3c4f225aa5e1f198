use tokio::sync::broadcast;
use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::error::RecvError;
use tokio::sync::oneshot::{self, Receiver as OneshotReceiver, Sender as OneshotSender};

use crate::error::Error;
use crate::game::actor::{GameCommand, GameEvent, GameSnapshot, GameWideEvent};
use crate::round::buttons::Press;
use crate::round::Outcome;

#[derive(Clone, Debug)]
pub struct GameClient {
    pub(super) game_tx: Sender<GameCommand>,
}

impl GameClient {
    pub async fn add_player(&self, nickname: &str) -> Result<GameWideEventReceiver, Error> {
        let (tx, rx): (OneshotSender<GameEvent>, OneshotReceiver<GameEvent>) = oneshot::channel();

        self.send_command(
            GameCommand::AddPlayer {
                nickname: nickname.to_string(),
                response_tx: tx,
            },
            "The Game is not alive. Can't add Player to Game",
        )
        .await?;

        match rx.await {
            Ok(GameEvent::PlayerAdded { broadcast_rx }) => {
                Ok(GameWideEventReceiver { broadcast_rx })
            }
            error => Err(GameClient::handle_event_error(error)),
        }
    }

    pub async fn remove_player(&self, nickname: &str) -> Result<(), Error> {
        self.send_command(
            GameCommand::DisconnectPlayer {
                nickname: nickname.to_string(),
            },
            "Tried to send GameCommand::DisconnectPlayer but GameActor is not listening",
        )
        .await
    }

    pub async fn start_game(&self) -> Result<(), Error> {
        self.request(
            |response_tx| GameCommand::StartGame { response_tx },
            "Tried to send GameCommand::StartGame but GameActor is not listening",
        )
        .await
    }

    pub async fn press_button(&self, nickname: &str) -> Result<Press, Error> {
        let (tx, rx): (OneshotSender<GameEvent>, OneshotReceiver<GameEvent>) = oneshot::channel();

        self.send_command(
            GameCommand::PressButton {
                nickname: nickname.to_string(),
                response_tx: tx,
            },
            "Tried to send GameCommand::PressButton but GameActor is not listening",
        )
        .await?;

        match rx.await {
            Ok(GameEvent::ButtonPressed { press }) => Ok(press),
            error => Err(GameClient::handle_event_error(error)),
        }
    }

    pub async fn get_state(&self) -> Result<GameSnapshot, Error> {
        let (tx, rx): (OneshotSender<GameEvent>, OneshotReceiver<GameEvent>) = oneshot::channel();

        self.send_command(
            GameCommand::GetGameState { response_tx: tx },
            "Tried to send GameCommand::GetGameState but GameActor is not listening",
        )
        .await?;

        match rx.await {
            Ok(GameEvent::GameState { snapshot }) => Ok(snapshot),
            error => Err(GameClient::handle_event_error(error)),
        }
    }

    /// Stops the game actor. Any round in flight is abandoned.
    pub async fn shutdown(&self) -> Result<(), Error> {
        self.send_command(
            GameCommand::Shutdown,
            "Tried to send GameCommand::Shutdown but GameActor is not listening",
        )
        .await
    }

    pub(crate) async fn start_round(&self) -> Result<(), Error> {
        self.request(
            |response_tx| GameCommand::StartRound { response_tx },
            "Tried to send GameCommand::StartRound but GameActor is not listening",
        )
        .await
    }

    pub(crate) async fn reveal_buttons(&self) -> Result<(), Error> {
        self.request(
            |response_tx| GameCommand::RevealButtons { response_tx },
            "Tried to send GameCommand::RevealButtons but GameActor is not listening",
        )
        .await
    }

    pub(crate) async fn resolve_round(&self, outcome: Outcome) -> Result<(), Error> {
        self.request(
            |response_tx| GameCommand::ResolveRound {
                outcome,
                response_tx,
            },
            "Tried to send GameCommand::ResolveRound but GameActor is not listening",
        )
        .await
    }

    /// Sends a command that is answered with `GameEvent::Ok`.
    async fn request<F>(&self, command: F, error_message: &str) -> Result<(), Error>
    where
        F: FnOnce(OneshotSender<GameEvent>) -> GameCommand,
    {
        let (tx, rx): (OneshotSender<GameEvent>, OneshotReceiver<GameEvent>) = oneshot::channel();

        self.send_command(command(tx), error_message).await?;

        match rx.await {
            Ok(GameEvent::Ok) => Ok(()),
            error => Err(GameClient::handle_event_error(error)),
        }
    }

    async fn send_command(&self, command: GameCommand, error_message: &str) -> Result<(), Error> {
        self.game_tx
            .send(command)
            .await
            .map_err(|_| Error::Internal(format!("{error_message}.")))
    }

    fn handle_event_error(error: Result<GameEvent, RecvError>) -> Error {
        match error {
            Ok(GameEvent::Error { error }) => error,
            Ok(unexpected_response) => Error::log_and_create_internal(&format!(
                "Received an unexpected GameEvent. GameEvent: '{unexpected_response}'."
            )),
            Err(_) => Error::Internal(
                "Sent a command to the Game actor, but the actor channel died.".to_string(),
            ),
        }
    }
}

pub struct GameWideEventReceiver {
    broadcast_rx: broadcast::Receiver<GameWideEvent>,
}

impl GameWideEventReceiver {
    pub async fn next(&mut self) -> Result<GameWideEvent, Error> {
        loop {
            match self.broadcast_rx.recv().await {
                Ok(event) => return Ok(event),
                // Only the latest state matters, skipped snapshots are fine
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::warn!("Player lagged behind the Game broadcast. Skipped: '{skipped}'.");
                }
                Err(error) => {
                    return Err(Error::Internal(format!(
                        "The broadcast channel with the Game has been closed. Error: {error}."
                    )))
                }
            }
        }
    }
}
