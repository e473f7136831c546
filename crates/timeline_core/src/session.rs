//! Session orchestration: one loaded pool, one live game at a time.

use crate::action::{Intent, PlaceError};
use crate::config::{ConfigError, GameConfig};
use crate::game::GameState;
use crate::types::{DropPosition, EventId, HistoricalEvent, PlacementResult};
use derive_more::{Display, Error, From};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, instrument, warn};

/// Error from session-level operations.
#[derive(Debug, Display, Error, From)]
pub enum SessionError {
    /// The event pool is empty, so no game can start.
    #[display("Cannot start game: no events loaded")]
    EmptyPool,

    /// No game has been started yet.
    #[display("No game in progress")]
    NotStarted,

    /// The configuration was rejected.
    #[display("{}", _0)]
    Config(ConfigError),

    /// The placement was rejected.
    #[display("{}", _0)]
    Place(PlaceError),
}

/// Holds the event pool, the last configuration and the live game.
///
/// Also tracks the card being revealed after a failed placement, which
/// is feedback only and never feeds back into play.
#[derive(Debug, Clone)]
pub struct GameSession {
    pool: Vec<HistoricalEvent>,
    last_config: Option<GameConfig>,
    state: Option<GameState>,
    revealing_card: Option<HistoricalEvent>,
    rng: ChaCha8Rng,
}

impl GameSession {
    /// Creates a session over an already-filtered pool.
    ///
    /// With a seed every deal is reproducible; without one the RNG is
    /// seeded randomly.
    #[instrument(skip(pool), fields(pool = pool.len()))]
    pub fn new(pool: Vec<HistoricalEvent>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        };
        Self {
            pool,
            last_config: None,
            state: None,
            revealing_card: None,
            rng,
        }
    }

    /// Starts a new game.
    ///
    /// # Errors
    ///
    /// Refuses an empty pool or an invalid configuration.
    #[instrument(skip(self, config))]
    pub fn start(&mut self, config: GameConfig) -> Result<&GameState, SessionError> {
        if self.pool.is_empty() {
            warn!("Cannot start game: no events loaded");
            return Err(SessionError::EmptyPool);
        }
        config.validate()?;

        let state = GameState::initialize(&config, &self.pool, &mut self.rng);
        info!(players = *config.player_count(), "Session started");
        self.last_config = Some(config);
        self.revealing_card = None;
        Ok(self.state.insert(state))
    }

    /// Deals a fresh game with the last configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotStarted`] if no game was ever started.
    #[instrument(skip(self))]
    pub fn restart(&mut self) -> Result<&GameState, SessionError> {
        let config = self.last_config.clone().ok_or(SessionError::NotStarted)?;
        self.start(config)
    }

    /// Drops the current game and returns to setup.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.state = None;
        self.revealing_card = None;
    }

    /// Applies an intent from either interaction mode.
    ///
    /// Returns the placement result for placements and `None` for
    /// reorders.
    #[instrument(skip(self))]
    pub fn apply(&mut self, intent: &Intent) -> Result<Option<PlacementResult>, SessionError> {
        let current = self.state.as_ref().ok_or(SessionError::NotStarted)?;
        let applied = intent.apply(current)?;

        if let Some(result) = &applied.result
            && !result.success
        {
            self.revealing_card = Some(result.event.clone());
        }
        self.state = Some(applied.state);
        Ok(applied.result)
    }

    /// Places a card.
    #[instrument(skip(self, drop))]
    pub fn place(
        &mut self,
        event_id: &EventId,
        drop: &DropPosition,
    ) -> Result<PlacementResult, SessionError> {
        let current = self.state.as_ref().ok_or(SessionError::NotStarted)?;
        let (next, result) = current.place_card(event_id, drop)?;
        if !result.success {
            self.revealing_card = Some(result.event.clone());
        }
        self.state = Some(next);
        Ok(result)
    }

    /// Reorders the current player's hand.
    #[instrument(skip(self))]
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), SessionError> {
        let current = self.state.as_ref().ok_or(SessionError::NotStarted)?;
        self.state = Some(current.reorder_hand(from, to));
        Ok(())
    }

    /// Passes the turn of a player with an empty hand.
    #[instrument(skip(self))]
    pub fn pass(&mut self) -> Result<(), SessionError> {
        let current = self.state.as_ref().ok_or(SessionError::NotStarted)?;
        self.state = Some(current.pass_turn()?);
        Ok(())
    }

    /// Returns the live game, if any.
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Returns the loaded pool.
    pub fn pool(&self) -> &[HistoricalEvent] {
        &self.pool
    }

    /// Returns the configuration of the last started game.
    pub fn last_config(&self) -> Option<&GameConfig> {
        self.last_config.as_ref()
    }

    /// Returns the card being revealed after a failed placement.
    pub fn revealing_card(&self) -> Option<&HistoricalEvent> {
        self.revealing_card.as_ref()
    }

    /// Clears the reveal feedback.
    #[instrument(skip(self))]
    pub fn clear_reveal(&mut self) {
        self.revealing_card = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Difficulty, GamePhase};

    fn pool() -> Vec<HistoricalEvent> {
        (0..12)
            .map(|i| {
                HistoricalEvent::new(
                    format!("e{i}"),
                    "event",
                    1500 + i * 25,
                    Category::Conflict,
                    Difficulty::Medium,
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_pool_refused() {
        let mut session = GameSession::new(Vec::new(), Some(1));
        assert!(matches!(session.start(GameConfig::default()), Err(SessionError::EmptyPool)));
        assert!(session.state().is_none());
    }

    #[test]
    fn test_invalid_config_refused() {
        let mut session = GameSession::new(pool(), Some(1));
        assert!(matches!(session.start(GameConfig::new(0, 5, 3)), Err(SessionError::Config(_))));
    }

    #[test]
    fn test_restart_requires_previous_game() {
        let mut session = GameSession::new(pool(), Some(1));
        assert!(matches!(session.restart(), Err(SessionError::NotStarted)));

        session.start(GameConfig::new(2, 3, 2)).expect("start");
        let restarted = session.restart().expect("restart");
        assert_eq!(restarted.phase(), GamePhase::Playing);
        assert_eq!(restarted.players().len(), 2);
    }

    #[test]
    fn test_reset_returns_to_setup() {
        let mut session = GameSession::new(pool(), Some(1));
        session.start(GameConfig::default()).expect("start");
        session.reset();
        assert!(session.state().is_none());
        assert!(matches!(session.reorder(0, 1), Err(SessionError::NotStarted)));
    }

    #[test]
    fn test_failed_placement_reveals_card() {
        let mut session = GameSession::new(pool(), Some(9));
        session.start(GameConfig::new(1, 4, 3)).expect("start");

        let state = session.state().expect("started").clone();
        let timeline = state.timeline();
        let card = state.players()[0].hand[0].clone();
        // Years are distinct, so one of the two ends is always wrong.
        let wrong = if card.year > timeline[0].year { 0 } else { timeline.len() };

        let result = session
            .place(&card.id, &DropPosition::at(timeline, wrong))
            .expect("legal");
        assert!(!result.success);
        assert_eq!(session.revealing_card().map(|e| &e.id), Some(&card.id));

        session.clear_reveal();
        assert!(session.revealing_card().is_none());
    }

    #[test]
    fn test_seeded_sessions_deal_identically() {
        let mut a = GameSession::new(pool(), Some(42));
        let mut b = GameSession::new(pool(), Some(42));
        let sa = a.start(GameConfig::new(2, 3, 3)).expect("start").clone();
        let sb = b.start(GameConfig::new(2, 3, 3)).expect("start").clone();
        assert_eq!(sa, sb);
    }
}
