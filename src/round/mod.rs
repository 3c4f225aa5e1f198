pub mod buttons;
pub mod controller;

use std::time::Duration;

use rand::Rng;

use crate::error::domain_error::DomainError;

/// Result of a round, decided by whether the press beat the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The player pressed before the buttons changed color.
    Early { player: usize },
    /// The player pressed once the buttons had changed color.
    OnTime { player: usize },
}

impl Outcome {
    pub fn player(&self) -> usize {
        match self {
            Outcome::Early { player } | Outcome::OnTime { player } => *player,
        }
    }

    /// Score change for every player of a game with `amount_of_players` players.
    pub fn score_deltas(&self, amount_of_players: usize) -> Vec<i32> {
        match *self {
            Outcome::Early { player } => (0..amount_of_players)
                .map(|index| if index == player { -1 } else { 1 })
                .collect(),
            Outcome::OnTime { player } => (0..amount_of_players)
                .map(|index| if index == player { 1 } else { 0 })
                .collect(),
        }
    }
}

/// In-flight state of a single round.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub target_delay: Duration,
    pub elapsed: bool,
    pub winner: Option<usize>,
}

impl Round {
    pub fn new(target_delay: Duration) -> Self {
        Round {
            target_delay,
            elapsed: false,
            winner: None,
        }
    }

    pub fn mark_elapsed(&mut self) {
        self.elapsed = true;
    }

    pub fn resolve(&mut self, player: usize) -> Outcome {
        self.winner = Some(player);
        if self.elapsed {
            Outcome::OnTime { player }
        } else {
            Outcome::Early { player }
        }
    }
}

/// Half-open range `[min, max)` the pre-reveal delay is drawn from.
/// A range with `min == max` always yields `min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayRange {
    min: Duration,
    max: Duration,
}

impl DelayRange {
    pub fn new(min: Duration, max: Duration) -> Result<Self, DomainError> {
        if min > max {
            return Err(DomainError::InvalidDelayRange(
                min.as_millis() as u64,
                max.as_millis() as u64,
            ));
        }
        Ok(DelayRange { min, max })
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let millis = rng.gen_range(self.min.as_millis() as u64..self.max.as_millis() as u64);
        Duration::from_millis(millis)
    }
}
