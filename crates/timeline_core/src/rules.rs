//! Placement and turn rules.

use crate::game::GameState;
use crate::types::{DropPosition, HistoricalEvent};
use tracing::instrument;

/// Checks a placement against the neighbors captured in `drop`.
///
/// Equal years on either side are accepted. Only the immediate neighbors
/// are consulted; the rest of the timeline is not.
#[instrument(skip_all, fields(event = %event.id, year = event.year, index = drop.index))]
pub fn is_placement_correct(
    _timeline: &[HistoricalEvent],
    event: &HistoricalEvent,
    drop: &DropPosition,
) -> bool {
    if let Some(left) = &drop.left_event
        && event.year < left.year
    {
        return false;
    }

    if let Some(right) = &drop.right_event
        && event.year > right.year
    {
        return false;
    }

    true
}

/// Returns the seat that plays after `current`.
#[instrument]
pub fn next_player_index(current: usize, player_count: usize) -> usize {
    if player_count == 0 {
        return 0;
    }
    (current + 1) % player_count
}

/// Returns true once a winner exists and the round has wrapped to seat 0.
///
/// Game over waits for the round to close so every seat gets the same
/// number of turns, which is how ties arise.
#[instrument(
    skip(state),
    fields(winners = state.winners().len(), current = state.current_player_index())
)]
pub fn should_game_end(state: &GameState) -> bool {
    !state.winners().is_empty() && state.current_player_index() == 0
}
