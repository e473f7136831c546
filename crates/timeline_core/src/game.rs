//! The game-state machine.
//!
//! `GameState` is a copy-on-write snapshot: every transition borrows the
//! current state and returns a new one, leaving the old value intact for
//! replay or comparison.

use crate::action::PlaceError;
use crate::config::GameConfig;
use crate::contracts::{Contract, PassContract, PlacementContract, PlacementRequest};
use crate::deal;
use crate::rules;
use crate::types::{DropPosition, EventId, GamePhase, HistoricalEvent, PlacementResult, Player};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Complete state of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) phase: GamePhase,
    pub(crate) timeline: Vec<HistoricalEvent>,
    pub(crate) deck: Vec<HistoricalEvent>,
    pub(crate) discard: Vec<HistoricalEvent>,
    pub(crate) players: Vec<Player>,
    pub(crate) current_player_index: usize,
    pub(crate) turn_number: u32,
    pub(crate) round_number: u32,
    pub(crate) winners: Vec<Player>,
    pub(crate) last_placement_result: Option<PlacementResult>,
    pub(crate) pool_size: usize,
}

// ─────────────────────────────────────────────────────────────
//  Setup
// ─────────────────────────────────────────────────────────────

impl GameState {
    /// Deals a new game from `pool`.
    ///
    /// The pool is shuffled once. The first `starting_timeline_events`
    /// cards seed the timeline (sorted), then each seat receives
    /// `cards_per_player` consecutive cards, and the rest is the deck.
    /// A short pool deals fewer cards rather than failing.
    #[instrument(
        skip(config, pool, rng),
        fields(pool = pool.len(), players = config.player_count())
    )]
    pub fn initialize<R: Rng>(config: &GameConfig, pool: &[HistoricalEvent], rng: &mut R) -> Self {
        let shuffled = deal::shuffle(pool, rng);

        let seed_len = (*config.starting_timeline_events()).min(shuffled.len());
        let (seed, mut rest) = shuffled.split_at(seed_len);
        let timeline = deal::sort_by_year(seed);

        let mut players = Vec::with_capacity(*config.player_count());
        for seat in 0..*config.player_count() {
            let take = (*config.cards_per_player()).min(rest.len());
            let (hand, remaining) = rest.split_at(take);
            rest = remaining;
            players.push(Player::new(seat, config.player_name(seat), hand.to_vec()));
        }

        if shuffled.len() < config.cards_required() {
            warn!(
                available = shuffled.len(),
                required = config.cards_required(),
                "Event pool smaller than a full deal"
            );
        }

        let state = Self {
            phase: GamePhase::Playing,
            timeline,
            deck: rest.to_vec(),
            discard: Vec::new(),
            players,
            current_player_index: 0,
            turn_number: 1,
            round_number: 1,
            winners: Vec::new(),
            last_placement_result: None,
            pool_size: pool.len(),
        };

        info!(
            timeline = state.timeline.len(),
            deck = state.deck.len(),
            "Game initialized"
        );
        state
    }
}

// ─────────────────────────────────────────────────────────────
//  Transitions
// ─────────────────────────────────────────────────────────────

impl GameState {
    /// Plays a card from the current player's hand.
    ///
    /// The placement is judged against the timeline as it is now; if the
    /// neighbors captured in `drop` are stale they are re-resolved first.
    ///
    /// # Errors
    ///
    /// Rejects the request without changing anything when the game is not
    /// in play, the card is not held by the current player, or the index
    /// is past the end of the timeline.
    #[instrument(
        skip(self, drop),
        fields(event = %event_id, index = drop.index, turn = self.turn_number)
    )]
    pub fn place_card(
        &self,
        event_id: &EventId,
        drop: &DropPosition,
    ) -> Result<(GameState, PlacementResult), PlaceError> {
        let request = PlacementRequest {
            event_id: event_id.clone(),
            index: drop.index,
        };
        PlacementContract::pre(self, &request)?;

        let drop = if drop.matches(&self.timeline) {
            drop.clone()
        } else {
            warn!(index = drop.index, "Stale drop position, re-resolving against current timeline");
            DropPosition::at(&self.timeline, drop.index)
        };

        let seat = self.current_player_index;
        let Some(event) = self.players[seat].card(event_id).cloned() else {
            return Err(PlaceError::CardNotInHand(event_id.clone()));
        };
        let success = rules::is_placement_correct(&self.timeline, &event, &drop);

        let mut next = self.clone();
        let player = &mut next.players[seat];
        player.hand = deal::remove_from_hand(&player.hand, event_id);

        if success {
            next.timeline = deal::insert_into_timeline(&next.timeline, event.clone(), drop.index);
            debug!(year = event.year, "Card placed correctly");
        } else {
            next.discard.push(event.clone());
            let (card, deck) = deal::draw(&next.deck);
            next.deck = deck;
            if let Some(card) = card {
                player.hand = deal::add_to_hand(&player.hand, card);
            }
            debug!(year = event.year, hand = player.hand.len(), "Card discarded");
        }

        next.record_win_if_empty(seat);
        next.advance_turn();

        let result = PlacementResult { success, event };
        next.last_placement_result = Some(result.clone());
        next.finish_if_round_closed();

        #[cfg(debug_assertions)]
        PlacementContract::post(self, &next)?;

        Ok((next, result))
    }

    /// Moves a card within the current player's hand.
    ///
    /// Free action: turn, round, deck and timeline are untouched.
    /// Out-of-range indices leave the hand as it was.
    #[instrument(skip(self), fields(seat = self.current_player_index))]
    pub fn reorder_hand(&self, old_index: usize, new_index: usize) -> GameState {
        let mut next = self.clone();
        if let Some(player) = next.players.get_mut(self.current_player_index) {
            player.hand = deal::array_move(&player.hand, old_index, new_index);
        }
        next
    }

    /// Ends the turn of a player whose hand is empty.
    ///
    /// Only reachable when the pool was too small to deal every seat a
    /// hand.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::HandNotEmpty`] if the current player holds cards,
    /// or [`PlaceError::NotPlaying`] outside of play.
    #[instrument(skip(self), fields(seat = self.current_player_index, turn = self.turn_number))]
    pub fn pass_turn(&self) -> Result<GameState, PlaceError> {
        PassContract::pre(self, &())?;

        let mut next = self.clone();
        next.advance_turn();
        next.finish_if_round_closed();

        #[cfg(debug_assertions)]
        PassContract::post(self, &next)?;

        Ok(next)
    }

    fn record_win_if_empty(&mut self, seat: usize) {
        let turn = self.turn_number;
        let player = &mut self.players[seat];
        if player.hand.is_empty() && !player.has_won {
            player.has_won = true;
            player.win_turn = Some(turn);
            info!(player = %player.name, turn, "Player emptied their hand");
            self.winners.push(player.clone());
        }
    }

    fn advance_turn(&mut self) {
        self.current_player_index =
            rules::next_player_index(self.current_player_index, self.players.len());
        if self.current_player_index == 0 {
            self.round_number += 1;
        }
        self.turn_number += 1;
    }

    fn finish_if_round_closed(&mut self) {
        if rules::should_game_end(self) {
            self.phase = GamePhase::GameOver;
            info!(
                winners = self.winners.len(),
                turn = self.turn_number,
                "Game over"
            );
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Accessors
// ─────────────────────────────────────────────────────────────

impl GameState {
    /// Returns the lifecycle phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Returns the timeline, sorted by year.
    pub fn timeline(&self) -> &[HistoricalEvent] {
        &self.timeline
    }

    /// Returns the undealt cards.
    pub fn deck(&self) -> &[HistoricalEvent] {
        &self.deck
    }

    /// Returns cards lost to failed placements.
    pub fn discard(&self) -> &[HistoricalEvent] {
        &self.discard
    }

    /// Returns all players in seat order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns the seat whose turn it is.
    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    /// Returns the player whose turn it is.
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    /// Returns the turn counter (starts at 1).
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Returns the round counter (starts at 1).
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Returns winners in the order they emptied their hands.
    pub fn winners(&self) -> &[Player] {
        &self.winners
    }

    /// Returns the most recent placement, if any.
    pub fn last_placement_result(&self) -> Option<&PlacementResult> {
        self.last_placement_result.as_ref()
    }

    /// Returns the number of cards the game was dealt from.
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Returns true once the game has ended.
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Returns winners ordered by the turn they won on.
    pub fn standings(&self) -> Vec<Player> {
        let mut sorted = self.winners.clone();
        sorted.sort_by_key(|p| p.win_turn.unwrap_or(0));
        sorted
    }

    /// Returns the insertion slots of the current timeline.
    pub fn drop_positions(&self) -> Vec<DropPosition> {
        deal::drop_positions(&self.timeline)
    }
}
