//! Winners invariant: the winners list agrees with the seats.

use super::Invariant;
use crate::game::GameState;
use std::collections::HashSet;

/// Invariant: winners are exactly the seats with `has_won`.
///
/// Each winner appears once, carries a `win_turn` earlier than the
/// current turn, and the seat it came from has an empty hand.
pub struct WinnersConsistentInvariant;

impl Invariant<GameState> for WinnersConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let mut seen = HashSet::new();
        for winner in state.winners() {
            if !seen.insert(winner.id) {
                return false;
            }
            let Some(seat) = state.players().get(winner.id) else {
                return false;
            };
            let won_earlier = winner.win_turn.is_some_and(|t| t < state.turn_number());
            if !seat.has_won || !seat.hand.is_empty() || !won_earlier {
                return false;
            }
        }
        let flagged = state.players().iter().filter(|p| p.has_won).count();
        flagged == state.winners().len()
    }

    fn description() -> &'static str {
        "Winners match the seats that emptied their hands"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Difficulty, HistoricalEvent};
    use crate::GameConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn started() -> GameState {
        let pool: Vec<_> = (0..8)
            .map(|i| {
                HistoricalEvent::new(
                    format!("e{i}"),
                    "event",
                    i,
                    Category::Exploration,
                    Difficulty::Easy,
                )
            })
            .collect();
        GameState::initialize(&GameConfig::new(2, 2, 2), &pool, &mut ChaCha8Rng::seed_from_u64(6))
    }

    #[test]
    fn test_no_winners_holds() {
        assert!(WinnersConsistentInvariant::holds(&started()));
    }

    #[test]
    fn test_flag_without_entry_violates() {
        let mut state = started();
        state.players[1].has_won = true;
        assert!(!WinnersConsistentInvariant::holds(&state));
    }
}
