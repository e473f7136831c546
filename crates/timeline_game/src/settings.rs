//! TOML settings file for the terminal host.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use timeline_core::{Category, Difficulty, Era, GameConfig, InteractionMode};
use tracing::{debug, info, instrument};

/// Host settings. Every key is optional; missing keys fall back to the
/// engine defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Number of seated players.
    #[serde(default)]
    player_count: Option<usize>,

    /// Initial hand size.
    #[serde(default)]
    cards_per_player: Option<usize>,

    /// Size of the seed timeline.
    #[serde(default)]
    starting_timeline_events: Option<usize>,

    /// Seat names in order.
    #[serde(default)]
    player_names: Vec<String>,

    /// Difficulty filter.
    #[serde(default)]
    difficulties: Vec<Difficulty>,

    /// Category filter.
    #[serde(default)]
    categories: Vec<Category>,

    /// Era filter.
    #[serde(default)]
    eras: Vec<Era>,

    /// Fixed RNG seed for reproducible deals.
    #[serde(default)]
    seed: Option<u64>,

    /// Interaction mode for the terminal session.
    #[serde(default)]
    mode: Option<InteractionMode>,
}

impl Settings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SettingsError::new(format!("Failed to read settings file: {}", e)))?;
        let settings = Self::from_toml_str(&content)?;
        info!(players = ?settings.player_count, seed = ?settings.seed, "Settings loaded");
        Ok(settings)
    }

    /// Parses settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        toml::from_str(content)
            .map_err(|e| SettingsError::new(format!("Failed to parse settings: {}", e)))
    }

    /// Overrides the player count when `count` is set.
    pub fn with_player_count(mut self, count: Option<usize>) -> Self {
        if count.is_some() {
            self.player_count = count;
        }
        self
    }

    /// Overrides the seat names when `names` is non-empty.
    pub fn with_player_names(mut self, names: Vec<String>) -> Self {
        if !names.is_empty() {
            self.player_names = names;
        }
        self
    }

    /// Overrides the seed when `seed` is set.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Overrides the interaction mode when `mode` is set.
    pub fn with_mode(mut self, mode: Option<InteractionMode>) -> Self {
        if mode.is_some() {
            self.mode = mode;
        }
        self
    }

    /// Builds the engine configuration.
    ///
    /// # Errors
    ///
    /// Fails if the resulting counts are out of bounds.
    #[instrument(skip(self))]
    pub fn to_config(&self) -> Result<GameConfig, SettingsError> {
        let defaults = GameConfig::default();
        let config = GameConfig::new(
            self.player_count.unwrap_or(*defaults.player_count()),
            self.cards_per_player.unwrap_or(*defaults.cards_per_player()),
            self.starting_timeline_events
                .unwrap_or(*defaults.starting_timeline_events()),
        )
        .with_player_names(self.player_names.clone())
        .with_difficulties(self.difficulties.clone())
        .with_categories(self.categories.clone())
        .with_eras(self.eras.clone());

        config
            .validate()
            .map_err(|e| SettingsError::new(format!("Invalid game settings: {}", e.message)))?;
        Ok(config)
    }

    /// Returns the configured mode, tap by default on a terminal.
    pub fn interaction_mode(&self) -> InteractionMode {
        self.mode.unwrap_or(InteractionMode::Tap)
    }
}

/// Settings error.
#[derive(Debug, Clone, Display, Error)]
#[display("Settings error: {} at {}:{}", message, file, line)]
pub struct SettingsError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SettingsError {
    /// Creates a new settings error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
