//! Sorted timeline invariant: the timeline never decreases by year.

use super::Invariant;
use crate::game::GameState;

/// Invariant: the timeline is non-decreasing by year.
///
/// This is the property every correct placement relies on, since
/// validation only looks at the two immediate neighbors.
pub struct SortedTimelineInvariant;

impl Invariant<GameState> for SortedTimelineInvariant {
    fn holds(state: &GameState) -> bool {
        state.timeline().windows(2).all(|w| w[0].year <= w[1].year)
    }

    fn description() -> &'static str {
        "Timeline is sorted ascending by year"
    }
}
