//! Timeline core - a chronology card game engine
//!
//! Players hold historical-event cards with hidden years and take turns
//! inserting them into a shared, always-sorted timeline. A correct
//! placement keeps the card on the timeline; a wrong one discards it and
//! draws a replacement. Emptying your hand wins, and the game ends once
//! the round that produced a winner has closed.
//!
//! # Architecture
//!
//! - **Deal**: pure shuffle, draw and reorder primitives
//! - **Game**: the copy-on-write `GameState` machine, guarded by contracts
//!   and a composable invariant set
//! - **Interaction**: drag and tap controllers that turn gestures into
//!   `Intent`s, plus long-press classification
//! - **Session**: one pool, one live game, restart and reveal feedback
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use timeline_core::{Category, Difficulty, DropPosition, GameConfig, GameState, HistoricalEvent};
//!
//! let pool: Vec<_> = (0..10)
//!     .map(|i| {
//!         HistoricalEvent::new(
//!             format!("e{i}"),
//!             "event",
//!             1800 + i * 20,
//!             Category::Cultural,
//!             Difficulty::Easy,
//!         )
//!     })
//!     .collect();
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let state = GameState::initialize(&GameConfig::new(2, 3, 2), &pool, &mut rng);
//!
//! let card = state.players()[0].hand[0].id.clone();
//! let (next, result) = state
//!     .place_card(&card, &DropPosition::at(state.timeline(), 0))
//!     .expect("legal placement");
//! assert_eq!(next.turn_number(), 2);
//! println!("{result}");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod config;
mod contracts;
mod deal;
mod format;
mod game;
mod interaction;
mod invariants;
mod rules;
mod session;
mod types;

// Crate-level exports - Domain types
pub use types::{
    Category, Difficulty, DropPosition, Era, EventId, GamePhase, HistoricalEvent, PlacementResult,
    Player,
};

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig, MAX_PLAYERS};

// Crate-level exports - Deal primitives
pub use deal::{
    add_to_hand, array_move, draw, drop_positions, insert_into_timeline, remove_from_hand, shuffle,
    sort_by_year,
};

// Crate-level exports - Rules
pub use rules::{is_placement_correct, next_player_index, should_game_end};

// Crate-level exports - State machine
pub use action::{Applied, Intent, PlaceError, Placement};
pub use game::GameState;

// Crate-level exports - Contracts and invariants
pub use contracts::{
    CardInHand, Contract, GameIsPlaying, HandIsEmpty, IndexInRange, PassContract, PlacementContract,
    PlacementRequest,
};
pub use invariants::{
    CardConservationInvariant, Invariant, InvariantSet, InvariantViolation, SortedTimelineInvariant,
    TimelineInvariants, TurnCountersInvariant, WinnersConsistentInvariant,
};

// Crate-level exports - Interaction adapter
pub use interaction::{
    CardDetails, CardRef, Controller, DeviceProfile, DragController, DragTarget, InteractionMode,
    LONG_PRESS_THRESHOLD, MOBILE_BREAKPOINT, MOVE_TOLERANCE, Point, PressOutcome, PressTracker,
    TapController, TapResponse,
};

// Crate-level exports - Session and display helpers
pub use format::format_year;
pub use session::{GameSession, SessionError};
