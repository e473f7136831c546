//! Tap-mode controller: select a card, then tap an insertion target.

use super::press::PressOutcome;
use super::{CardDetails, CardRef};
use crate::action::{Intent, Placement};
use crate::deal;
use crate::game::GameState;
use crate::types::{DropPosition, EventId, HistoricalEvent};
use tracing::{debug, instrument};

/// How the controller reacted to a completed press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapResponse {
    /// A hand card became selected.
    Selected(EventId),
    /// The selected card was tapped again and released.
    Deselected,
    /// A long press opened the read-only details view.
    ShowDetails(CardDetails),
    /// An insertion target was tapped with a card selected.
    Commit(Intent),
    /// The press had no effect.
    Ignored,
}

/// Transient selection state. Never part of `GameState`.
#[derive(Debug, Clone, Default)]
pub struct TapController {
    selected: Option<EventId>,
}

impl TapController {
    /// Creates a controller with nothing selected.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles selection of the hand card at `hand_index`.
    ///
    /// Tapping the selected card again deselects it; tapping another card
    /// moves the selection.
    #[instrument(skip(self, state))]
    pub fn tap_hand_card(&mut self, state: &GameState, hand_index: usize) -> TapResponse {
        let Some(card) = state.current_player().and_then(|p| p.hand.get(hand_index)) else {
            return TapResponse::Ignored;
        };
        if self.selected.as_ref() == Some(&card.id) {
            debug!(event = %card.id, "Deselected");
            self.selected = None;
            TapResponse::Deselected
        } else {
            debug!(event = %card.id, "Selected");
            self.selected = Some(card.id.clone());
            TapResponse::Selected(card.id.clone())
        }
    }

    /// Returns the insertion targets to render.
    ///
    /// Empty while nothing is selected; otherwise one before the first
    /// card, one after each card, or a single target for an empty
    /// timeline.
    #[instrument(skip(self, state))]
    pub fn insertion_targets(&self, state: &GameState) -> Vec<DropPosition> {
        if self.selected_card(state).is_none() {
            return Vec::new();
        }
        deal::drop_positions(state.timeline())
    }

    /// Taps insertion target `index`, committing the selected card.
    ///
    /// Clears the selection whatever the outcome of the placement.
    #[instrument(skip(self, state))]
    pub fn tap_target(&mut self, state: &GameState, index: usize) -> Option<Intent> {
        if index > state.timeline().len() {
            return None;
        }
        let card = self.selected_card(state)?.id.clone();
        self.selected = None;
        let drop = DropPosition::at(state.timeline(), index);
        Some(Intent::Place(Placement::new(card, drop)))
    }

    /// Routes a finished press on a card to the matching action.
    ///
    /// Long presses always open details and never select or place.
    #[instrument(skip(self, state))]
    pub fn handle_press(
        &mut self,
        state: &GameState,
        card: CardRef,
        outcome: PressOutcome,
    ) -> TapResponse {
        match (outcome, card) {
            (PressOutcome::LongPress, card) => CardDetails::lookup(state, card)
                .map(TapResponse::ShowDetails)
                .unwrap_or(TapResponse::Ignored),
            (PressOutcome::Tap, CardRef::Hand(index)) => self.tap_hand_card(state, index),
            (PressOutcome::Tap, CardRef::Timeline(_)) => TapResponse::Ignored,
            (PressOutcome::Tap, CardRef::Target(index)) => self
                .tap_target(state, index)
                .map(TapResponse::Commit)
                .unwrap_or(TapResponse::Ignored),
        }
    }

    /// Returns the selected card if the current player still holds it.
    pub fn selected_card<'a>(&self, state: &'a GameState) -> Option<&'a HistoricalEvent> {
        let id = self.selected.as_ref()?;
        state.current_player()?.card(id)
    }

    /// Drops the selection.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.selected = None;
    }
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
                    format!("Event {i}"),
                    1000 + i,
                    Category::Cultural,
                    Difficulty::Easy,
                )
            })
            .collect();
        GameState::initialize(&GameConfig::new(2, 3, 2), &pool, &mut ChaCha8Rng::seed_from_u64(17))
    }

    #[test]
    fn test_tap_toggles_selection() {
        let state = started();
        let mut tap = TapController::new();
        let id = state.players()[0].hand[1].id.clone();

        assert_eq!(tap.tap_hand_card(&state, 1), TapResponse::Selected(id.clone()));
        assert_eq!(tap.selected_card(&state).map(|e| &e.id), Some(&id));
        assert_eq!(tap.tap_hand_card(&state, 1), TapResponse::Deselected);
        assert!(tap.selected_card(&state).is_none());
    }

    #[test]
    fn test_targets_only_while_selected() {
        let state = started();
        let mut tap = TapController::new();
        assert!(tap.insertion_targets(&state).is_empty());

        tap.tap_hand_card(&state, 0);
        assert_eq!(tap.insertion_targets(&state).len(), state.timeline().len() + 1);
    }

    #[test]
    fn test_tap_target_commits_and_clears() {
        let state = started();
        let mut tap = TapController::new();
        tap.tap_hand_card(&state, 2);
        let intent = tap.tap_target(&state, 1).expect("placement");

        match intent {
            Intent::Place(p) => {
                assert_eq!(p.event_id, state.players()[0].hand[2].id);
                assert_eq!(p.drop, DropPosition::at(state.timeline(), 1));
            }
            other => panic!("unexpected intent {other:?}"),
        }
        assert!(tap.selected_card(&state).is_none());
    }

    #[test]
    fn test_tap_target_without_selection() {
        let state = started();
        let mut tap = TapController::new();
        assert!(tap.tap_target(&state, 0).is_none());
    }

    #[test]
    fn test_long_press_shows_details_without_selecting() {
        let state = started();
        let mut tap = TapController::new();
        let response = tap.handle_press(&state, CardRef::Hand(0), PressOutcome::LongPress);

        match response {
            TapResponse::ShowDetails(details) => {
                assert_eq!(details.event.id, state.players()[0].hand[0].id);
                assert!(!details.reveal_year);
            }
            other => panic!("unexpected response {other:?}"),
        }
        assert!(tap.selected_card(&state).is_none());
    }

    #[test]
    fn test_timeline_long_press_reveals_year() {
        let state = started();
        let mut tap = TapController::new();
        let response = tap.handle_press(&state, CardRef::Timeline(0), PressOutcome::LongPress);
        assert!(matches!(response, TapResponse::ShowDetails(d) if d.reveal_year));
    }

    #[test]
    fn test_short_press_on_target_commits() {
        let state = started();
        let mut tap = TapController::new();
        tap.handle_press(&state, CardRef::Hand(0), PressOutcome::Tap);
        let response = tap.handle_press(&state, CardRef::Target(0), PressOutcome::Tap);
        assert!(matches!(response, TapResponse::Commit(Intent::Place(_))));
    }

    #[test]
    fn test_selection_of_previous_player_is_dropped() {
        let state = started();
        let mut tap = TapController::new();
        tap.tap_hand_card(&state, 0);
        let intent = tap.tap_target(&state, 0).expect("placement");
        let next = intent.apply(&state).expect("legal").state;

        // Another player's turn: nothing stays selected.
        assert!(tap.selected_card(&next).is_none());
        assert!(tap.insertion_targets(&next).is_empty());
    }
}
