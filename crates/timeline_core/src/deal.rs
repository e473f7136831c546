//! Shuffling and dealing primitives.
//!
//! Every function here is pure: inputs are borrowed and a new sequence
//! is returned.

use crate::types::{DropPosition, EventId, HistoricalEvent};
use rand::Rng;
use tracing::instrument;

/// Returns a uniformly shuffled copy of `items` (Fisher-Yates).
#[instrument(skip(items, rng), fields(len = items.len()))]
pub fn shuffle<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Returns a copy sorted ascending by year.
///
/// The sort is stable, so equal years keep their relative order.
#[instrument(skip(events), fields(len = events.len()))]
pub fn sort_by_year(events: &[HistoricalEvent]) -> Vec<HistoricalEvent> {
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|e| e.year);
    sorted
}

/// Draws the front card of the deck.
///
/// An empty deck yields `None` and an empty deck.
#[instrument(skip(deck), fields(len = deck.len()))]
pub fn draw(deck: &[HistoricalEvent]) -> (Option<HistoricalEvent>, Vec<HistoricalEvent>) {
    match deck.split_first() {
        Some((card, rest)) => (Some(card.clone()), rest.to_vec()),
        None => (None, Vec::new()),
    }
}

/// Removes the first card matching `id`. No-op if absent.
#[instrument(skip(hand), fields(len = hand.len()))]
pub fn remove_from_hand(hand: &[HistoricalEvent], id: &EventId) -> Vec<HistoricalEvent> {
    let mut next = hand.to_vec();
    if let Some(pos) = next.iter().position(|e| &e.id == id) {
        next.remove(pos);
    }
    next
}

/// Appends a card to the back of the hand.
#[instrument(skip(hand, event), fields(len = hand.len(), event = %event.id))]
pub fn add_to_hand(hand: &[HistoricalEvent], event: HistoricalEvent) -> Vec<HistoricalEvent> {
    let mut next = hand.to_vec();
    next.push(event);
    next
}

/// Moves the element at `from` to `to`, shifting the ones in between.
///
/// Out-of-range indices return an unchanged copy.
#[instrument(skip(items), fields(len = items.len()))]
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut moved = items.to_vec();
    if from >= moved.len() || to >= moved.len() {
        return moved;
    }
    let item = moved.remove(from);
    moved.insert(to, item);
    moved
}

/// Inserts a card into the timeline at `index` (clamped to the end).
#[instrument(skip(timeline, event), fields(len = timeline.len(), event = %event.id))]
pub fn insert_into_timeline(
    timeline: &[HistoricalEvent],
    event: HistoricalEvent,
    index: usize,
) -> Vec<HistoricalEvent> {
    let mut next = timeline.to_vec();
    next.insert(index.min(next.len()), event);
    next
}

/// Lists every insertion slot of the timeline.
///
/// One slot before the first card and one after each card; an empty
/// timeline has exactly one slot.
#[instrument(skip(timeline), fields(len = timeline.len()))]
pub fn drop_positions(timeline: &[HistoricalEvent]) -> Vec<DropPosition> {
    (0..=timeline.len())
        .map(|index| DropPosition::at(timeline, index))
        .collect()
}
