//! First-class player intents.
//!
//! Both interaction modes produce an [`Intent`]; the state machine only
//! ever sees these values, never raw gestures.

use crate::game::GameState;
use crate::types::{DropPosition, EventId, GamePhase, PlacementResult};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A request to play a held card into the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// The card being played.
    pub event_id: EventId,
    /// Where the player dropped it.
    pub drop: DropPosition,
}

impl Placement {
    /// Creates a new placement.
    pub fn new(event_id: EventId, drop: DropPosition) -> Self {
        Self { event_id, drop }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> slot {}", self.event_id, self.drop.index)
    }
}

/// A mode-agnostic commit request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Play a card; ends the turn.
    Place(Placement),
    /// Rearrange the current hand; does not end the turn.
    Reorder {
        /// Index of the card to move.
        from: usize,
        /// Index it should end up at.
        to: usize,
    },
}

/// What applying an intent produced.
#[derive(Debug, Clone)]
pub struct Applied {
    /// The new state.
    pub state: GameState,
    /// Present only for placements.
    pub result: Option<PlacementResult>,
}

impl Intent {
    /// Applies this intent to a state, returning the successor.
    #[instrument(skip(self, state), fields(intent = ?self))]
    pub fn apply(&self, state: &GameState) -> Result<Applied, PlaceError> {
        match self {
            Intent::Place(placement) => {
                let (state, result) = state.place_card(&placement.event_id, &placement.drop)?;
                Ok(Applied {
                    state,
                    result: Some(result),
                })
            }
            Intent::Reorder { from, to } => Ok(Applied {
                state: state.reorder_hand(*from, *to),
                result: None,
            }),
        }
    }

    /// Returns true if applying this intent consumes the turn.
    pub fn ends_turn(&self) -> bool {
        matches!(self, Intent::Place(_))
    }
}

/// Error rejecting a placement request.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PlaceError {
    /// The game is not accepting placements.
    #[display("Game is not in play (phase: {})", _0)]
    NotPlaying(GamePhase),

    /// The current player does not hold the card.
    #[display("Card {} is not in the current player's hand", _0)]
    CardNotInHand(EventId),

    /// The insertion index is past the end of the timeline.
    #[display("Drop index {} is out of range (timeline has {} cards)", index, len)]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Timeline length.
        len: usize,
    },

    /// Passing is only allowed with an empty hand.
    #[display("Cannot pass while holding {} cards", _0)]
    HandNotEmpty(usize),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for PlaceError {}
