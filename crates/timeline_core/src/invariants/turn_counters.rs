//! Turn counter invariant: seat, turn and round move in lockstep.

use super::Invariant;
use crate::game::GameState;

/// Invariant: counters agree with each other.
///
/// Play starts at seat 0 on turn 1, round 1, and every turn advances the
/// seat by one, so after `t - 1` turns the seat is `(t - 1) mod N` and
/// the round is `(t - 1) / N + 1`.
pub struct TurnCountersInvariant;

impl Invariant<GameState> for TurnCountersInvariant {
    fn holds(state: &GameState) -> bool {
        let seats = state.players().len();
        if seats == 0 || state.turn_number() == 0 {
            return false;
        }
        let elapsed = (state.turn_number() - 1) as usize;
        state.current_player_index() == elapsed % seats
            && state.round_number() as usize == elapsed / seats + 1
    }

    fn description() -> &'static str {
        "Seat, turn and round counters advance together"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Difficulty, DropPosition, HistoricalEvent};
    use crate::GameConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_counters_track_turns() {
        let pool: Vec<_> = (0..20)
            .map(|i| {
                HistoricalEvent::new(
                    format!("e{i}"),
                    "event",
                    i,
                    Category::Infrastructure,
                    Difficulty::Easy,
                )
            })
            .collect();
        let mut state = GameState::initialize(
            &GameConfig::new(3, 4, 2),
            &pool,
            &mut ChaCha8Rng::seed_from_u64(4),
        );

        for _ in 0..5 {
            assert!(TurnCountersInvariant::holds(&state));
            let Some(card) = state
                .current_player()
                .and_then(|p| p.hand.first())
                .map(|e| e.id.clone())
            else {
                break;
            };
            let (next, _) = state
                .place_card(&card, &DropPosition::at(state.timeline(), 0))
                .expect("legal placement");
            state = next;
        }
        assert!(TurnCountersInvariant::holds(&state));
    }

    #[test]
    fn test_desynced_round_violates() {
        let pool: Vec<_> = (0..6)
            .map(|i| {
                HistoricalEvent::new(
                    format!("e{i}"),
                    "event",
                    i,
                    Category::Infrastructure,
                    Difficulty::Easy,
                )
            })
            .collect();
        let mut state = GameState::initialize(
            &GameConfig::new(2, 2, 1),
            &pool,
            &mut ChaCha8Rng::seed_from_u64(4),
        );
        state.round_number = 3;
        assert!(!TurnCountersInvariant::holds(&state));
    }
}
