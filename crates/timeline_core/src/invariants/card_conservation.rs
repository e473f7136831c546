//! Card conservation invariant: no card is duplicated or lost.

use super::Invariant;
use crate::game::GameState;
use std::collections::HashSet;

/// Invariant: every dealt card is in exactly one place.
///
/// Hands, deck, timeline and discard together hold exactly the cards
/// the game was dealt from, each id once.
pub struct CardConservationInvariant;

impl Invariant<GameState> for CardConservationInvariant {
    fn holds(state: &GameState) -> bool {
        let all = state
            .players()
            .iter()
            .flat_map(|p| p.hand.iter())
            .chain(state.deck())
            .chain(state.timeline())
            .chain(state.discard());

        let mut seen = HashSet::new();
        let mut count = 0;
        for event in all {
            if !seen.insert(&event.id) {
                return false;
            }
            count += 1;
        }
        count == state.pool_size()
    }

    fn description() -> &'static str {
        "Every card is in exactly one of hand, deck, timeline or discard"
    }
}
