//! Contract-based validation for state transitions.
//!
//! Preconditions are always checked; postconditions run in debug builds
//! and verify the composed invariant set.

use crate::action::PlaceError;
use crate::game::GameState;
use crate::invariants::{InvariantSet, TimelineInvariants};
use crate::types::{EventId, GamePhase};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
///
/// - Precondition: {P(state, action)} must hold before applying action
/// - Postcondition: {Q(before, after)} must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), PlaceError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), PlaceError>;
}

/// The parts of a placement the preconditions look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementRequest {
    /// Card being played.
    pub event_id: EventId,
    /// Requested insertion index.
    pub index: usize,
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game must be in play.
pub struct GameIsPlaying;

impl GameIsPlaying {
    /// Checks the phase.
    #[instrument(skip(state))]
    pub fn check(state: &GameState) -> Result<(), PlaceError> {
        if state.phase() != GamePhase::Playing {
            Err(PlaceError::NotPlaying(state.phase()))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the current player must hold the card.
pub struct CardInHand;

impl CardInHand {
    /// Checks the current hand.
    #[instrument(skip(state))]
    pub fn check(event_id: &EventId, state: &GameState) -> Result<(), PlaceError> {
        match state.current_player() {
            Some(player) if player.holds(event_id) => Ok(()),
            _ => Err(PlaceError::CardNotInHand(event_id.clone())),
        }
    }
}

/// Precondition: the index must address a timeline slot.
pub struct IndexInRange;

impl IndexInRange {
    /// Checks `index <= timeline.len()`.
    #[instrument(skip(state))]
    pub fn check(index: usize, state: &GameState) -> Result<(), PlaceError> {
        let len = state.timeline().len();
        if index > len {
            Err(PlaceError::IndexOutOfRange { index, len })
        } else {
            Ok(())
        }
    }
}

/// Precondition: the current player has nothing left to play.
pub struct HandIsEmpty;

impl HandIsEmpty {
    /// Checks the current hand is empty.
    #[instrument(skip(state))]
    pub fn check(state: &GameState) -> Result<(), PlaceError> {
        let held = state.current_player().map(|p| p.hand.len()).unwrap_or(0);
        if held > 0 {
            Err(PlaceError::HandNotEmpty(held))
        } else {
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Placement Contract
// ─────────────────────────────────────────────────────────────

/// Contract for placing a card.
///
/// Preconditions:
/// - Game is in play
/// - Card is in the current player's hand
/// - Index addresses a timeline slot
///
/// Postconditions:
/// - Timeline remains sorted
/// - Every card is accounted for exactly once
/// - Turn counters stay in lockstep
/// - Winners are consistent with hands
pub struct PlacementContract;

impl Contract<GameState, PlacementRequest> for PlacementContract {
    fn pre(state: &GameState, request: &PlacementRequest) -> Result<(), PlaceError> {
        GameIsPlaying::check(state)?;
        CardInHand::check(&request.event_id, state)?;
        IndexInRange::check(request.index, state)?;
        Ok(())
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), PlaceError> {
        if after.turn_number() != before.turn_number() + 1 {
            warn!(
                before = before.turn_number(),
                after = after.turn_number(),
                "Turn did not advance by one"
            );
            return Err(PlaceError::InvariantViolation(
                "Postcondition failed: turn must advance by exactly one".to_string(),
            ));
        }
        check_invariants(after)
    }
}

/// Contract for passing with an empty hand.
pub struct PassContract;

impl Contract<GameState, ()> for PassContract {
    fn pre(state: &GameState, _action: &()) -> Result<(), PlaceError> {
        GameIsPlaying::check(state)?;
        HandIsEmpty::check(state)?;
        Ok(())
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), PlaceError> {
        if after.timeline() != before.timeline() || after.deck() != before.deck() {
            return Err(PlaceError::InvariantViolation(
                "Postcondition failed: passing must not move cards".to_string(),
            ));
        }
        check_invariants(after)
    }
}

fn check_invariants(state: &GameState) -> Result<(), PlaceError> {
    TimelineInvariants::check_all(state).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        PlaceError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}
