use std::fmt::{Display, Formatter};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::oneshot::Sender as OneshotSender;
use tokio::sync::{
    broadcast,
    broadcast::error::SendError,
    mpsc,
    mpsc::{Receiver, Sender, WeakSender},
    watch,
};

use crate::config::GameSettings;
use crate::error::Error;
use crate::game::actor_client::GameClient;
use crate::game::game_fsm::GameFsmState;
use crate::game::status_message::StatusMessage;
use crate::game::Game;
use crate::metrics::{EARLY_PRESSES, ROUNDS_PLAYED};
use crate::player::Player;
use crate::round::buttons::Press;
use crate::round::controller::RoundController;
use crate::round::{DelayRange, Outcome};

pub struct GameActor {
    game: Game,
    settings: GameSettings,
    delay_range: DelayRange,
    game_rx: Receiver<GameCommand>,
    game_tx: WeakSender<GameCommand>,
    broadcast_tx: broadcast::Sender<GameWideEvent>,
    shutdown_tx: watch::Sender<bool>,
}

impl GameActor {
    /// Runs the Game Actor in background and returns a Client to communicate with it
    pub fn spawn(settings: GameSettings) -> Result<GameClient, Error> {
        GameActor::spawn_with_rng(settings, StdRng::from_entropy())
    }

    pub fn spawn_with_rng(settings: GameSettings, rng: StdRng) -> Result<GameClient, Error> {
        let delay_range = DelayRange::new(settings.min_delay(), settings.max_delay())?;
        let game = Game::new(&settings.players, rng)?;
        let (game_tx, game_rx): (Sender<GameCommand>, Receiver<GameCommand>) = mpsc::channel(128);
        let (broadcast_tx, _): (
            broadcast::Sender<GameWideEvent>,
            broadcast::Receiver<GameWideEvent>,
        ) = broadcast::channel(32);
        let (shutdown_tx, _) = watch::channel(false);

        tokio::spawn(
            GameActor {
                game,
                settings,
                delay_range,
                game_rx,
                game_tx: game_tx.downgrade(),
                broadcast_tx,
                shutdown_tx,
            }
            .start(),
        );

        Ok(GameClient { game_tx })
    }

    async fn start(mut self) {
        log::info!(
            "Game actor started. Players: '{}'.",
            self.settings.players.join(",")
        );

        while let Some(command) = self.game_rx.recv().await {
            let (response, state_changed) = match command {
                GameCommand::AddPlayer {
                    nickname,
                    response_tx,
                } => {
                    let result =
                        self.game
                            .connect_player(&nickname)
                            .map(|_| GameEvent::PlayerAdded {
                                broadcast_rx: self.broadcast_tx.subscribe(),
                            });
                    let changed = result.is_ok();
                    (Some((result, response_tx)), changed)
                }
                GameCommand::DisconnectPlayer { nickname } => {
                    let _ = self.game.disconnect_player(&nickname);
                    (None, true)
                }
                GameCommand::StartGame { response_tx } => {
                    let result = self.start_game().map(|_| GameEvent::Ok);
                    (Some((result, response_tx)), false)
                }
                GameCommand::PressButton {
                    nickname,
                    response_tx,
                } => {
                    let result = self
                        .game
                        .press_button(&nickname)
                        .map(|press| GameEvent::ButtonPressed { press });
                    (Some((result, response_tx)), false)
                }
                GameCommand::GetGameState { response_tx } => {
                    let result = Ok(GameEvent::GameState {
                        snapshot: self.snapshot(),
                    });
                    (Some((result, response_tx)), false)
                }
                GameCommand::StartRound { response_tx } => {
                    let result = self.game.start_round().map(|_| {
                        ROUNDS_PLAYED.inc();
                        GameEvent::Ok
                    });
                    let changed = result.is_ok();
                    (Some((result, response_tx)), changed)
                }
                GameCommand::RevealButtons { response_tx } => {
                    let result = self.game.reveal_buttons().map(|_| GameEvent::Ok);
                    let changed = result.is_ok();
                    (Some((result, response_tx)), changed)
                }
                GameCommand::ResolveRound {
                    outcome,
                    response_tx,
                } => {
                    let result = self.game.resolve_round(outcome).map(|_| {
                        if let Outcome::Early { .. } = outcome {
                            EARLY_PRESSES.inc();
                        }
                        GameEvent::Ok
                    });
                    let changed = result.is_ok();
                    (Some((result, response_tx)), changed)
                }
                GameCommand::Shutdown => {
                    log::info!("Received a shutdown request. Stopping game actor.");
                    break;
                }
            };
            if let Some((result, response_tx)) = response {
                let event = match result {
                    Ok(event) => event,
                    Err(error) => GameEvent::Error { error },
                };
                if let Err(error) = response_tx.send(event) {
                    log::error!("Sent GameEvent but the response channel is closed. Error: '{error}'.");
                }
            }
            if state_changed {
                let _ = self.send_game_state();
            }
        }

        self.stop_game();
    }

    fn start_game(&mut self) -> Result<(), Error> {
        if !self.game.start_game() {
            log::info!("The game is already running, ignoring StartGame.");
            return Ok(());
        }
        let game_tx = self.game_tx.upgrade().ok_or_else(|| {
            Error::log_and_create_internal("The Game channel is closed. Can't start the round loop.")
        })?;
        RoundController::spawn(
            GameClient { game_tx },
            self.game.buttons(),
            self.delay_range,
            self.settings.delay_before_new_round(),
            self.shutdown_tx.subscribe(),
        );
        log::info!("Game started.");
        Ok(())
    }

    fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            state: self.game.state().clone(),
            message: self.game.message(),
            players: self.game.players().to_vec(),
            rounds_played: self.game.rounds_played(),
        }
    }

    fn send_game_state(&self) -> Result<usize, SendError<GameWideEvent>> {
        self.broadcast_tx.send(GameWideEvent::GameState {
            snapshot: self.snapshot(),
        })
    }

    fn stop_game(self) {
        // Any in-flight round is abandoned
        let _ = self.shutdown_tx.send(true);
        self.game.buttons().disarm();
        log::info!("Game actor stopped.");
    }
}

pub(crate) enum GameCommand {
    AddPlayer {
        nickname: String,
        response_tx: OneshotSender<GameEvent>,
    },
    DisconnectPlayer {
        nickname: String,
    },
    StartGame {
        response_tx: OneshotSender<GameEvent>,
    },
    PressButton {
        nickname: String,
        response_tx: OneshotSender<GameEvent>,
    },
    GetGameState {
        response_tx: OneshotSender<GameEvent>,
    },
    StartRound {
        response_tx: OneshotSender<GameEvent>,
    },
    RevealButtons {
        response_tx: OneshotSender<GameEvent>,
    },
    ResolveRound {
        outcome: Outcome,
        response_tx: OneshotSender<GameEvent>,
    },
    Shutdown,
}

#[derive(Debug)]
pub(crate) enum GameEvent {
    PlayerAdded {
        broadcast_rx: broadcast::Receiver<GameWideEvent>,
    },
    ButtonPressed {
        press: Press,
    },
    GameState {
        snapshot: GameSnapshot,
    },
    Ok,
    Error {
        error: Error,
    },
}

impl Display for GameEvent {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                GameEvent::PlayerAdded { .. } => "GameEvent::PlayerAdded".to_string(),
                GameEvent::ButtonPressed { press } => format!("GameEvent::ButtonPressed({press:?})"),
                GameEvent::GameState { .. } => "GameEvent::GameState".to_string(),
                GameEvent::Ok => "GameEvent::Ok".to_string(),
                GameEvent::Error { error } => format!("Error '{error}'"),
            }
        )
    }
}

/// What every display shows: round state, status message and player scores.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    pub state: GameFsmState,
    pub message: StatusMessage,
    pub players: Vec<Player>,
    pub rounds_played: u64,
}

#[derive(Clone, Debug)]
pub enum GameWideEvent {
    GameState { snapshot: GameSnapshot },
}
