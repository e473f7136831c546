//! Historical event catalog: JSON loading, validation and filtering.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use strum::IntoEnumIterator;
use timeline_core::{Category, Difficulty, Era, GameConfig, HistoricalEvent};
use tracing::{debug, info, instrument, warn};

/// File listing the event files of a catalog directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// A deduplicated set of events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    events: Vec<HistoricalEvent>,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    categories: Vec<ManifestCategory>,
}

#[derive(Debug, Deserialize)]
struct ManifestCategory {
    name: String,
    files: Vec<String>,
}

impl Catalog {
    /// Builds a catalog, dropping later records with a duplicate id.
    #[instrument(skip(events), fields(records = events.len()))]
    pub fn from_events(events: Vec<HistoricalEvent>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(events.len());
        for event in events {
            if seen.insert(event.id.clone()) {
                unique.push(event);
            } else {
                warn!(event = %event.id, "Duplicate event found, keeping first");
            }
        }
        Self { events: unique }
    }

    /// Parses a JSON array of events.
    ///
    /// Records that fail validation are skipped with a warning; only a
    /// document that is not an array is an error.
    #[instrument(skip(json), fields(bytes = json.len()))]
    pub fn parse_str(json: &str) -> Result<Self, CatalogError> {
        Ok(Self::from_events(parse_records(json)?))
    }

    /// Loads a single JSON file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| CatalogError::new(format!("Failed to read event file: {}", e)))?;
        let catalog = Self::parse_str(&content)?;
        info!(events = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Loads every file listed in a directory's `manifest.json`.
    ///
    /// A missing or malformed manifest is an error. Individual files that
    /// cannot be read or parsed are skipped with a warning.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let manifest_path = dir.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&manifest_path)
            .map_err(|e| CatalogError::new(format!("Failed to load events manifest: {}", e)))?;
        let manifest: Manifest = serde_json::from_str(&content)
            .map_err(|e| CatalogError::new(format!("Failed to parse events manifest: {}", e)))?;

        let mut events = Vec::new();
        for category in &manifest.categories {
            for file in &category.files {
                let path = dir.join(file);
                let loaded = std::fs::read_to_string(&path)
                    .map_err(|e| e.to_string())
                    .and_then(|json| parse_records(&json).map_err(|e| e.message));
                match loaded {
                    Ok(records) => {
                        debug!(
                            category = %category.name,
                            file = %file,
                            records = records.len(),
                            "Loaded event file"
                        );
                        events.extend(records);
                    }
                    Err(error) => warn!(file = %file, %error, "Skipping event file"),
                }
            }
        }

        let catalog = Self::from_events(events);
        info!(
            events = catalog.len(),
            categories = manifest.categories.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Loads a directory (via its manifest) or a single file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        if path.is_dir() {
            Self::load_dir(path)
        } else {
            Self::load_file(path)
        }
    }

    /// Returns the events that pass every filter.
    #[instrument(skip(self), fields(events = self.events.len()))]
    pub fn filter(&self, filters: &Filters) -> Vec<HistoricalEvent> {
        let kept: Vec<_> = self
            .events
            .iter()
            .filter(|e| filters.matches(e))
            .cloned()
            .collect();
        debug!(kept = kept.len(), "Catalog filtered");
        kept
    }

    /// Filters the catalog into a pool that can deal at least one hand card.
    ///
    /// A pool that only covers the seed timeline leaves every hand empty and
    /// the game unwinnable, so it is refused.
    #[instrument(skip(self, config), fields(events = self.events.len()))]
    pub fn deal_pool(
        &self,
        filters: &Filters,
        config: &GameConfig,
    ) -> Result<Vec<HistoricalEvent>, CatalogError> {
        let pool = self.filter(filters);
        let seed = *config.starting_timeline_events();
        if pool.is_empty() {
            return Err(CatalogError::new("No events match the selected filters"));
        }
        if pool.len() <= seed {
            return Err(CatalogError::new(format!(
                "{} events selected, but the timeline alone takes {}; no cards are left for hands",
                pool.len(),
                seed
            )));
        }
        if pool.len() < config.cards_required() {
            warn!(
                selected = pool.len(),
                required = config.cards_required(),
                "Pool is short, some hands will be dealt fewer cards"
            );
        }
        Ok(pool)
    }

    /// Returns all events in load order.
    pub fn events(&self) -> &[HistoricalEvent] {
        &self.events
    }

    /// Consumes the catalog.
    pub fn into_events(self) -> Vec<HistoricalEvent> {
        self.events
    }

    /// Returns the number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no event was loaded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Counts events per category, in declaration order.
    pub fn count_by_category(&self) -> Vec<(Category, usize)> {
        Category::iter()
            .map(|c| (c, self.events.iter().filter(|e| e.category == c).count()))
            .collect()
    }

    /// Counts events per difficulty.
    pub fn count_by_difficulty(&self) -> Vec<(Difficulty, usize)> {
        Difficulty::iter()
            .map(|d| (d, self.events.iter().filter(|e| e.difficulty == d).count()))
            .collect()
    }

    /// Counts events per era.
    pub fn count_by_era(&self) -> Vec<(Era, usize)> {
        Era::iter()
            .map(|era| (era, self.events.iter().filter(|e| e.era() == era).count()))
            .collect()
    }
}

fn parse_records(json: &str) -> Result<Vec<HistoricalEvent>, CatalogError> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(json)
        .map_err(|e| CatalogError::new(format!("Event file is not a JSON array: {}", e)))?;

    let mut events = Vec::with_capacity(raw.len());
    for (position, value) in raw.into_iter().enumerate() {
        match serde_json::from_value::<HistoricalEvent>(value) {
            Ok(event) if event.id.as_str().trim().is_empty() => {
                warn!(position, "Skipping event with empty name");
            }
            Ok(event) => events.push(event),
            Err(error) => warn!(position, %error, "Skipping invalid event"),
        }
    }
    Ok(events)
}

/// Difficulty, category and era selections.
///
/// An empty list places no restriction on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Filters {
    /// Allowed difficulties.
    #[serde(default)]
    difficulties: Vec<Difficulty>,
    /// Allowed categories.
    #[serde(default)]
    categories: Vec<Category>,
    /// Allowed eras.
    #[serde(default)]
    eras: Vec<Era>,
}

impl Filters {
    /// Creates filters that let everything through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts difficulties.
    pub fn with_difficulties(mut self, difficulties: Vec<Difficulty>) -> Self {
        self.difficulties = difficulties;
        self
    }

    /// Restricts categories.
    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    /// Restricts eras.
    pub fn with_eras(mut self, eras: Vec<Era>) -> Self {
        self.eras = eras;
        self
    }

    /// Takes the selections carried by a game configuration.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            difficulties: config.selected_difficulties().clone(),
            categories: config.selected_categories().clone(),
            eras: config.selected_eras().clone(),
        }
    }

    /// Returns true if the event passes every dimension.
    pub fn matches(&self, event: &HistoricalEvent) -> bool {
        (self.difficulties.is_empty() || self.difficulties.contains(&event.difficulty))
            && (self.categories.is_empty() || self.categories.contains(&event.category))
            && (self.eras.is_empty() || self.eras.contains(&event.era()))
    }
}

/// Catalog loading error.
#[derive(Debug, Clone, Display, Error)]
#[display("Catalog error: {} at {}:{}", message, file, line)]
pub struct CatalogError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl CatalogError {
    /// Creates a new catalog error.
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
