pub mod actor;
pub mod actor_client;
pub mod game_fsm;
pub mod status_message;

use std::sync::Arc;

use rand::rngs::StdRng;
use rust_fsm::StateMachine;

use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::game::game_fsm::{GameFsm, GameFsmInput, GameFsmState};
use crate::game::status_message::StatusMessage;
use crate::player::registry::PlayerRegistry;
use crate::player::Player;
use crate::round::buttons::{ButtonBoard, Press};
use crate::round::Outcome;

pub struct Game {
    registry: PlayerRegistry,
    buttons: Arc<ButtonBoard>,
    fsm: StateMachine<GameFsm>,
    message: StatusMessage,
    is_started: bool,
    rounds_played: u64,
    rng: StdRng,
}

impl Game {
    pub fn new(nicknames: &[String], mut rng: StdRng) -> Result<Self, Error> {
        let registry = PlayerRegistry::new(nicknames, &mut rng)?;
        let buttons = Arc::new(ButtonBoard::new(registry.len()));

        Ok(Game {
            registry,
            buttons,
            fsm: StateMachine::new(),
            message: StatusMessage::StartGame,
            is_started: false,
            rounds_played: 0,
            rng,
        })
    }

    pub fn state(&self) -> &GameFsmState {
        self.fsm.state()
    }

    pub fn message(&self) -> StatusMessage {
        self.message
    }

    pub fn players(&self) -> &[Player] {
        self.registry.players()
    }

    pub fn buttons(&self) -> Arc<ButtonBoard> {
        Arc::clone(&self.buttons)
    }

    pub fn is_started(&self) -> bool {
        self.is_started
    }

    pub fn rounds_played(&self) -> u64 {
        self.rounds_played
    }

    pub fn connect_player(&mut self, nickname: &str) -> Result<(), Error> {
        match self.registry.get_mut(nickname) {
            Some(player) if player.is_connected => Err(Error::Domain(
                DomainError::PlayerAlreadyConnected(nickname.to_string()),
            )),
            Some(player) => {
                player.is_connected = true;
                Ok(())
            }
            None => Err(Error::Domain(DomainError::PlayerDoesNotExist(
                nickname.to_string(),
            ))),
        }
    }

    pub fn disconnect_player(&mut self, nickname: &str) -> Result<(), Error> {
        if let Some(player) = self.registry.get_mut(nickname) {
            player.is_connected = false;
            Ok(())
        } else {
            Err(Error::log_and_create_internal(&format!(
                "Tried to disconnect player '{nickname}' but it does not exist."
            )))
        }
    }

    /// Returns `true` only for the call that actually starts the round loop.
    pub fn start_game(&mut self) -> bool {
        if self.is_started {
            return false;
        }
        self.is_started = true;
        true
    }

    pub fn start_round(&mut self) -> Result<(), Error> {
        self.process_event(&GameFsmInput::StartRound)?;
        self.rounds_played += 1;
        self.message = StatusMessage::Wait;
        Ok(())
    }

    pub fn reveal_buttons(&mut self) -> Result<(), Error> {
        self.process_event(&GameFsmInput::TimerFired)?;
        self.registry.randomize_button_colors(&mut self.rng);
        self.message = StatusMessage::PressButton;
        Ok(())
    }

    pub fn press_button(&self, nickname: &str) -> Result<Press, Error> {
        let index = self.registry.index_of(nickname).ok_or_else(|| {
            Error::Domain(DomainError::PlayerDoesNotExist(nickname.to_string()))
        })?;
        Ok(self.buttons.press(index))
    }

    pub fn resolve_round(&mut self, outcome: Outcome) -> Result<(), Error> {
        let (event, message) = match outcome {
            Outcome::Early { .. } => (GameFsmInput::EarlyPress, StatusMessage::WrongTime),
            Outcome::OnTime { .. } => (GameFsmInput::Press, StatusMessage::GreatJob),
        };
        self.process_event(&event)?;
        self.registry.apply_outcome(&outcome)?;
        self.message = message;
        Ok(())
    }

    fn process_event(&mut self, event: &GameFsmInput) -> Result<(), Error> {
        self.fsm.consume(event).map(|_| ()).map_err(|error| {
            Error::log_and_create_internal(&format!(
                "The fsm in state {:?} can't transition with an event {:?}. Error: '{error}'.",
                self.fsm.state(),
                event
            ))
        })
    }
}
