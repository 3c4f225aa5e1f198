use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::select;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;

use crate::game::actor_client::GameClient;
use crate::round::buttons::ButtonBoard;
use crate::round::{DelayRange, Outcome, Round};

/// Drives rounds forever: wait, reveal, take the first press, score, pause.
pub struct RoundController {
    game: GameClient,
    buttons: Arc<ButtonBoard>,
    delay_range: DelayRange,
    delay_before_new_round: Duration,
    shutdown_rx: watch::Receiver<bool>,
    rng: StdRng,
}

impl RoundController {
    pub fn spawn(
        game: GameClient,
        buttons: Arc<ButtonBoard>,
        delay_range: DelayRange,
        delay_before_new_round: Duration,
        shutdown_rx: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        tokio::spawn(
            RoundController {
                game,
                buttons,
                delay_range,
                delay_before_new_round,
                shutdown_rx,
                rng: StdRng::from_entropy(),
            }
            .start(),
        )
    }

    async fn start(mut self) {
        log::info!(
            "Round loop started. MinDelay: '{:?}', MaxDelay: '{:?}'.",
            self.delay_range.min(),
            self.delay_range.max()
        );

        while let Some(outcome) = self.run_round().await {
            log::debug!("Round finished. Outcome: '{outcome:?}'.");
        }

        self.buttons.disarm();
        log::info!("Round loop stopped, the game is gone.");
    }

    /// Plays one round. `None` means the game was torn down and the round abandoned.
    async fn run_round(&mut self) -> Option<Outcome> {
        let mut round = Round::new(self.delay_range.sample(&mut self.rng));
        // Listen before showing "Wait!", a press right after it is already early
        let mut press_rx = self.buttons.arm();
        self.game.start_round().await.ok()?;

        let timer = time::sleep(round.target_delay);
        tokio::pin!(timer);

        let player = select! {
            biased;
            _ = self.shutdown_rx.changed() => return None,
            press = &mut press_rx => press.ok()?,
            _ = &mut timer => {
                if self.is_torn_down() {
                    return None;
                }
                round.mark_elapsed();
                self.game.reveal_buttons().await.ok()?;

                // The press is still outstanding, keep waiting for it
                select! {
                    biased;
                    _ = self.shutdown_rx.changed() => return None,
                    press = &mut press_rx => press.ok()?,
                }
            }
        };

        if self.is_torn_down() {
            return None;
        }
        let outcome = round.resolve(player);
        self.game.resolve_round(outcome).await.ok()?;
        self.buttons.disarm();

        select! {
            biased;
            _ = self.shutdown_rx.changed() => return None,
            _ = time::sleep(self.delay_before_new_round) => {}
        }

        Some(outcome)
    }

    fn is_torn_down(&self) -> bool {
        self.shutdown_rx.has_changed().unwrap_or(true) || *self.shutdown_rx.borrow()
    }
}
