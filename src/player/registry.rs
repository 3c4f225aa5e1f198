use std::collections::HashSet;

use rand::Rng;

use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::player::button_color::ButtonColor;
use crate::player::Player;
use crate::round::Outcome;

/// Fixed list of players. Membership is decided once, only scores, colors and
/// connection flags change afterwards.
#[derive(Debug, Clone)]
pub struct PlayerRegistry {
    players: Vec<Player>,
}

impl PlayerRegistry {
    pub fn new<R: Rng + ?Sized>(nicknames: &[String], rng: &mut R) -> Result<Self, DomainError> {
        if nicknames.is_empty() {
            return Err(DomainError::NoPlayersConfigured);
        }
        let mut seen = HashSet::new();
        if let Some(repeated) = nicknames.iter().find(|nickname| !seen.insert(*nickname)) {
            return Err(DomainError::DuplicatedPlayer(repeated.to_string()));
        }

        Ok(PlayerRegistry {
            players: nicknames
                .iter()
                .map(|nickname| Player::new(nickname, ButtonColor::random(rng)))
                .collect(),
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn index_of(&self, nickname: &str) -> Option<usize> {
        self.players
            .iter()
            .position(|player| player.nickname == nickname)
    }

    pub fn get_mut(&mut self, nickname: &str) -> Option<&mut Player> {
        self.players
            .iter_mut()
            .find(|player| player.nickname == nickname)
    }

    pub fn increment_score(&mut self, index: usize) -> Result<(), Error> {
        self.add_to_score(index, 1)
    }

    pub fn decrement_score(&mut self, index: usize) -> Result<(), Error> {
        self.add_to_score(index, -1)
    }

    pub fn apply_outcome(&mut self, outcome: &Outcome) -> Result<(), Error> {
        if outcome.player() >= self.players.len() {
            return Err(Error::log_and_create_internal(&format!(
                "Tried to apply an outcome for player index '{}' but there are only '{}' players.",
                outcome.player(),
                self.players.len()
            )));
        }
        let amount_of_players = self.players.len();
        for (player, delta) in self
            .players
            .iter_mut()
            .zip(outcome.score_deltas(amount_of_players))
        {
            player.score += delta;
        }
        Ok(())
    }

    pub fn randomize_button_colors<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for player in self.players.iter_mut() {
            player.button_color = ButtonColor::random(rng);
        }
    }

    fn add_to_score(&mut self, index: usize, delta: i32) -> Result<(), Error> {
        match self.players.get_mut(index) {
            Some(player) => {
                player.score += delta;
                Ok(())
            }
            None => Err(Error::log_and_create_internal(&format!(
                "Tried to change the score of player index '{index}' but it does not exist."
            ))),
        }
    }
}
