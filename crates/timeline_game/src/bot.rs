//! Simple bot that knows the answer some of the time.

use rand::Rng;
use timeline_core::{DropPosition, GameState, Intent, Placement};
use tracing::{debug, instrument};

/// Returns the slot that keeps the timeline sorted for `year`.
pub fn correct_slot(state: &GameState, year: i64) -> usize {
    state.timeline().partition_point(|e| e.year <= year)
}

/// A seat played by the computer.
#[derive(Debug, Clone)]
pub struct Bot {
    name: String,
    accuracy: f64,
}

impl Bot {
    /// Creates a bot that places correctly with probability `accuracy`.
    ///
    /// `accuracy` is clamped to `0.0..=1.0`; NaN counts as `0.0`.
    pub fn new(name: impl Into<String>, accuracy: f64) -> Self {
        let accuracy = if accuracy.is_nan() { 0.0 } else { accuracy.clamp(0.0, 1.0) };
        Self {
            name: name.into(),
            accuracy,
        }
    }

    /// Returns the bot's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Picks the next placement for the current player.
    ///
    /// Plays the first card in hand. Returns `None` for an empty hand.
    #[instrument(skip(self, state, rng), fields(bot = %self.name))]
    pub fn pick_intent<R: Rng>(&self, state: &GameState, rng: &mut R) -> Option<Intent> {
        let card = state.current_player()?.hand.first()?;
        let index = if rng.random_bool(self.accuracy) {
            correct_slot(state, card.year)
        } else {
            rng.random_range(0..=state.timeline().len())
        };
        debug!(event = %card.id, index, "Bot chose a slot");
        Some(Intent::Place(Placement::new(
            card.id.clone(),
            DropPosition::at(state.timeline(), index),
        )))
    }
}
