//! Game configuration.

use crate::types::{Category, Difficulty, Era};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Largest supported table.
pub const MAX_PLAYERS: usize = 6;

/// Options for starting a game.
///
/// The difficulty, category and era selections are applied by the catalog
/// before `initialize` is called; the engine never reads them.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seated players.
    #[serde(default = "default_player_count")]
    player_count: usize,

    /// Initial hand size per player.
    #[serde(default = "default_cards_per_player")]
    cards_per_player: usize,

    /// Size of the seed timeline.
    #[serde(default = "default_starting_timeline_events")]
    starting_timeline_events: usize,

    /// Display names; blank or missing entries become "Player N".
    #[serde(default)]
    player_names: Vec<String>,

    /// Difficulty filter (empty means all).
    #[serde(default)]
    selected_difficulties: Vec<Difficulty>,

    /// Category filter (empty means all).
    #[serde(default)]
    selected_categories: Vec<Category>,

    /// Era filter (empty means all).
    #[serde(default)]
    selected_eras: Vec<Era>,
}

fn default_player_count() -> usize {
    1
}

fn default_cards_per_player() -> usize {
    5
}

fn default_starting_timeline_events() -> usize {
    3
}

impl GameConfig {
    /// Creates a configuration with no names and no filters.
    #[instrument]
    pub fn new(
        player_count: usize,
        cards_per_player: usize,
        starting_timeline_events: usize,
    ) -> Self {
        Self {
            player_count,
            cards_per_player,
            starting_timeline_events,
            player_names: Vec::new(),
            selected_difficulties: Vec::new(),
            selected_categories: Vec::new(),
            selected_eras: Vec::new(),
        }
    }

    /// Sets the player names.
    pub fn with_player_names(mut self, names: Vec<String>) -> Self {
        self.player_names = names;
        self
    }

    /// Sets the difficulty filter.
    pub fn with_difficulties(mut self, difficulties: Vec<Difficulty>) -> Self {
        self.selected_difficulties = difficulties;
        self
    }

    /// Sets the category filter.
    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.selected_categories = categories;
        self
    }

    /// Sets the era filter.
    pub fn with_eras(mut self, eras: Vec<Era>) -> Self {
        self.selected_eras = eras;
        self
    }

    /// Returns the display name for seat `index`.
    pub fn player_name(&self, index: usize) -> String {
        match self.player_names.get(index).map(|n| n.trim()) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Player {}", index + 1),
        }
    }

    /// Number of cards a full deal would consume.
    pub fn cards_required(&self) -> usize {
        self.starting_timeline_events + self.player_count * self.cards_per_player
    }

    /// Checks the counts are within supported bounds.
    #[instrument(skip(self), fields(players = self.player_count))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_count == 0 || self.player_count > MAX_PLAYERS {
            return Err(ConfigError::new(format!(
                "player_count must be 1..={}, got {}",
                MAX_PLAYERS, self.player_count
            )));
        }
        if self.cards_per_player == 0 {
            return Err(ConfigError::new("cards_per_player must be at least 1"));
        }
        if self.starting_timeline_events == 0 {
            return Err(ConfigError::new("starting_timeline_events must be at least 1"));
        }
        debug!("Config validated");
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(
            default_player_count(),
            default_cards_per_player(),
            default_starting_timeline_events(),
        )
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
