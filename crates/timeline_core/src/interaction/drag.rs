//! Drag-mode controller: continuous pointer tracking.

use crate::action::{Intent, Placement};
use crate::game::GameState;
use crate::types::{DropPosition, EventId, HistoricalEvent};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// What the pointer is over during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DragTarget {
    /// A card already on the timeline.
    TimelineCard {
        /// Timeline index of the hovered card.
        index: usize,
        /// Horizontal center of the dragged card.
        pointer_x: f32,
        /// Horizontal center of the hovered card.
        card_center_x: f32,
    },
    /// The zone before the first timeline card.
    StartEdge,
    /// The zone after the last timeline card.
    EndEdge,
    /// Another slot in the player's own hand.
    HandSlot(usize),
}

impl DragTarget {
    /// Resolves the timeline insertion index this target points at.
    ///
    /// Hand slots have no insertion index.
    #[instrument]
    pub fn insertion_index(self, timeline_len: usize) -> Option<usize> {
        match self {
            DragTarget::TimelineCard {
                index,
                pointer_x,
                card_center_x,
            } => {
                let slot = if pointer_x < card_center_x { index } else { index + 1 };
                Some(slot.min(timeline_len))
            }
            DragTarget::StartEdge => Some(0),
            DragTarget::EndEdge => Some(timeline_len),
            DragTarget::HandSlot(_) => None,
        }
    }
}

/// Transient drag state. Never part of `GameState`.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    dragged_card: Option<HistoricalEvent>,
    is_dragging: bool,
    insertion_preview: Option<usize>,
}

impl DragController {
    /// Creates an idle controller.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks up the card at `hand_index` from the current player's hand.
    ///
    /// Returns false (and stays idle) if there is no such card.
    #[instrument(skip(self, state))]
    pub fn start(&mut self, state: &GameState, hand_index: usize) -> bool {
        let card = state
            .current_player()
            .and_then(|p| p.hand.get(hand_index))
            .cloned();
        match card {
            Some(card) => {
                debug!(event = %card.id, "Drag started");
                self.dragged_card = Some(card);
                self.is_dragging = true;
                self.insertion_preview = None;
                true
            }
            None => false,
        }
    }

    /// Updates the insertion preview as the pointer moves.
    #[instrument(skip(self, state))]
    pub fn over(&mut self, state: &GameState, target: Option<DragTarget>) {
        if !self.is_dragging {
            return;
        }
        self.insertion_preview =
            target.and_then(|t| t.insertion_index(state.timeline().len()));
    }

    /// Finishes the drag.
    ///
    /// A timeline target yields a placement built against the current
    /// timeline, a hand slot yields a reorder, and no target snaps the
    /// card back. Transient state is cleared in every case.
    #[instrument(skip(self, state))]
    pub fn end(&mut self, state: &GameState, target: Option<DragTarget>) -> Option<Intent> {
        let card = self.dragged_card.take();
        self.is_dragging = false;
        self.insertion_preview = None;

        let card = card?;
        let Some(target) = target else {
            debug!(event = %card.id, "Dropped nowhere, snapping back");
            return None;
        };

        match target {
            DragTarget::HandSlot(to) => {
                let from = hand_position(state, &card.id)?;
                (from != to).then_some(Intent::Reorder { from, to })
            }
            other => {
                let index = other.insertion_index(state.timeline().len())?;
                let drop = DropPosition::at(state.timeline(), index);
                Some(Intent::Place(Placement::new(card.id, drop)))
            }
        }
    }

    /// Abandons the drag with no effect.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) {
        self.dragged_card = None;
        self.is_dragging = false;
        self.insertion_preview = None;
    }

    /// Returns the card being dragged.
    pub fn dragged_card(&self) -> Option<&HistoricalEvent> {
        self.dragged_card.as_ref()
    }

    /// Returns true while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Returns the index the card would be inserted at if dropped now.
    pub fn insertion_preview(&self) -> Option<usize> {
        self.insertion_preview
    }
}

fn hand_position(state: &GameState, id: &EventId) -> Option<usize> {
    state.current_player()?.hand.iter().position(|e| &e.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::types::{Category, Difficulty};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn started() -> GameState {
        let pool: Vec<_> = (0..10)
            .map(|i| {
                HistoricalEvent::new(
                    format!("e{i}"),
                    "event",
                    i * 10,
                    Category::Cultural,
                    Difficulty::Easy,
                )
            })
            .collect();
        GameState::initialize(&GameConfig::new(1, 4, 3), &pool, &mut ChaCha8Rng::seed_from_u64(13))
    }

    #[test]
    fn test_left_half_inserts_before() {
        let target = DragTarget::TimelineCard {
            index: 1,
            pointer_x: 90.0,
            card_center_x: 100.0,
        };
        assert_eq!(target.insertion_index(3), Some(1));
    }

    #[test]
    fn test_right_half_inserts_after() {
        let target = DragTarget::TimelineCard {
            index: 1,
            pointer_x: 110.0,
            card_center_x: 100.0,
        };
        assert_eq!(target.insertion_index(3), Some(2));
    }

    #[test]
    fn test_edges_pin_index() {
        assert_eq!(DragTarget::StartEdge.insertion_index(4), Some(0));
        assert_eq!(DragTarget::EndEdge.insertion_index(4), Some(4));
        assert_eq!(DragTarget::HandSlot(2).insertion_index(4), None);
    }

    #[test]
    fn test_drop_on_timeline_builds_placement() {
        let state = started();
        let mut drag = DragController::new();
        assert!(drag.start(&state, 0));
        drag.over(&state, Some(DragTarget::EndEdge));
        assert_eq!(drag.insertion_preview(), Some(3));

        let intent = drag.end(&state, Some(DragTarget::EndEdge)).expect("placement");
        match intent {
            Intent::Place(placement) => {
                assert_eq!(placement.event_id, state.players()[0].hand[0].id);
                assert_eq!(placement.drop.index, 3);
                assert_eq!(placement.drop.left_event.as_ref(), state.timeline().last());
                assert!(placement.drop.right_event.is_none());
            }
            other => panic!("unexpected intent {other:?}"),
        }
        assert!(!drag.is_dragging());
        assert!(drag.dragged_card().is_none());
    }

    #[test]
    fn test_drop_on_hand_slot_reorders() {
        let state = started();
        let mut drag = DragController::new();
        drag.start(&state, 0);
        let intent = drag.end(&state, Some(DragTarget::HandSlot(2)));
        assert_eq!(intent, Some(Intent::Reorder { from: 0, to: 2 }));
    }

    #[test]
    fn test_drop_nowhere_snaps_back() {
        let state = started();
        let mut drag = DragController::new();
        drag.start(&state, 1);
        assert_eq!(drag.end(&state, None), None);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_start_on_missing_card_stays_idle() {
        let state = started();
        let mut drag = DragController::new();
        assert!(!drag.start(&state, 99));
        assert!(!drag.is_dragging());
        assert_eq!(drag.end(&state, Some(DragTarget::StartEdge)), None);
    }

    #[test]
    fn test_cancel_discards() {
        let state = started();
        let mut drag = DragController::new();
        drag.start(&state, 0);
        drag.over(&state, Some(DragTarget::StartEdge));
        drag.cancel();
        assert!(drag.insertion_preview().is_none());
        assert_eq!(drag.end(&state, Some(DragTarget::StartEdge)), None);
    }
}
