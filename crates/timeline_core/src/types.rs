//! Core domain types for the timeline game.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Stable identifier of a historical event.
///
/// Identity throughout the engine is by id, never by year.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates a new event id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Category of a historical event.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    /// Wars, revolutions and politics.
    Conflict,
    /// Natural and man-made disasters.
    Disasters,
    /// Voyages, inventions and discoveries.
    Exploration,
    /// Art, religion and social movements.
    Cultural,
    /// Buildings, roads and engineering works.
    Infrastructure,
    /// Treaties and institutions.
    Diplomatic,
}

impl Category {
    /// Returns the human-readable label for this category.
    pub fn label(self) -> &'static str {
        match self {
            Self::Conflict => "Conflict & Politics",
            Self::Disasters => "Disasters & Crises",
            Self::Exploration => "Exploration & Discovery",
            Self::Cultural => "Cultural & Social",
            Self::Infrastructure => "Infrastructure & Construction",
            Self::Diplomatic => "Diplomatic & Institutional",
        }
    }
}

/// Difficulty rating of a historical event.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Well-known events.
    Easy,
    /// Moderately obscure events.
    Medium,
    /// Obscure events.
    Hard,
}

/// Historical era, a closed set of year ranges.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Era {
    /// Up to 3001 BCE.
    Prehistory,
    /// 3000 BCE to 499 CE.
    Ancient,
    /// 500 to 1499.
    Medieval,
    /// 1500 to 1759.
    #[serde(alias = "earlyModern")]
    #[strum(serialize = "early_modern", serialize = "earlymodern")]
    EarlyModern,
    /// 1760 to 1913.
    Industrial,
    /// 1914 to 1945.
    #[serde(alias = "worldWars")]
    #[strum(serialize = "world_wars", serialize = "worldwars")]
    WorldWars,
    /// 1946 to 1991.
    #[serde(alias = "coldWar")]
    #[strum(serialize = "cold_war", serialize = "coldwar")]
    ColdWar,
    /// 1992 onward.
    Modern,
}

impl Era {
    /// Returns the era a year belongs to.
    #[instrument]
    pub fn of_year(year: i64) -> Self {
        match year {
            i64::MIN..-3000 => Self::Prehistory,
            -3000..500 => Self::Ancient,
            500..1500 => Self::Medieval,
            1500..1760 => Self::EarlyModern,
            1760..1914 => Self::Industrial,
            1914..1946 => Self::WorldWars,
            1946..1992 => Self::ColdWar,
            _ => Self::Modern,
        }
    }

    /// Returns true if the year falls inside this era.
    pub fn contains(self, year: i64) -> bool {
        Self::of_year(year) == self
    }
}

/// A historical event card.
///
/// Supplied by the catalog and never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalEvent {
    /// Unique identifier.
    #[serde(rename = "name")]
    pub id: EventId,
    /// Name shown on the card.
    #[serde(rename = "friendly_name")]
    pub display_name: String,
    /// Year of the event, negative for BCE.
    pub year: i64,
    /// Event category.
    pub category: Category,
    /// Difficulty rating.
    pub difficulty: Difficulty,
    /// Longer description shown in the details view.
    pub description: String,
    /// Optional image reference.
    #[serde(rename = "image_url", default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl HistoricalEvent {
    /// Creates an event with an empty description and no image.
    pub fn new(
        id: impl Into<EventId>,
        display_name: impl Into<String>,
        year: i64,
        category: Category,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            year,
            category,
            difficulty,
            description: String::new(),
            image_ref: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the era this event belongs to.
    pub fn era(&self) -> Era {
        Era::of_year(self.year)
    }
}

/// A player seated in the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat index, stable for the whole game.
    pub id: usize,
    /// Display name.
    pub name: String,
    /// Cards in hand, in display order.
    pub hand: Vec<HistoricalEvent>,
    /// Whether the player has emptied their hand.
    pub has_won: bool,
    /// Turn on which the hand became empty.
    pub win_turn: Option<u32>,
}

impl Player {
    /// Creates a player with the given hand.
    pub fn new(id: usize, name: impl Into<String>, hand: Vec<HistoricalEvent>) -> Self {
        Self {
            id,
            name: name.into(),
            hand,
            has_won: false,
            win_turn: None,
        }
    }

    /// Finds a card in hand by id.
    pub fn card(&self, id: &EventId) -> Option<&HistoricalEvent> {
        self.hand.iter().find(|e| &e.id == id)
    }

    /// Returns true if the card is in hand.
    pub fn holds(&self, id: &EventId) -> bool {
        self.card(id).is_some()
    }
}

/// Lifecycle phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Waiting for a configuration.
    #[default]
    Setup,
    /// Players are taking turns.
    Playing,
    /// A full round completed with at least one winner.
    GameOver,
}

/// Outcome of the most recent placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementResult {
    /// Whether the card was placed correctly.
    pub success: bool,
    /// The card that was played.
    pub event: HistoricalEvent,
}

impl std::fmt::Display for PlacementResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.success {
            write!(f, "Correct! \"{}\" placed successfully", self.event.display_name)
        } else {
            write!(f, "Wrong! \"{}\" has been discarded", self.event.display_name)
        }
    }
}

/// A requested insertion point in the timeline.
///
/// `left_event`/`right_event` are the neighbors at `index` when the
/// request was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropPosition {
    /// Insertion index, `0..=timeline.len()`.
    pub index: usize,
    /// Neighbor immediately before the slot.
    pub left_event: Option<HistoricalEvent>,
    /// Neighbor immediately after the slot.
    pub right_event: Option<HistoricalEvent>,
}

impl DropPosition {
    /// Builds the drop position at `index` against the given timeline.
    ///
    /// Indices past the end are clamped to `timeline.len()`.
    pub fn at(timeline: &[HistoricalEvent], index: usize) -> Self {
        let index = index.min(timeline.len());
        Self {
            index,
            left_event: index.checked_sub(1).and_then(|i| timeline.get(i)).cloned(),
            right_event: timeline.get(index).cloned(),
        }
    }

    /// Returns true if the captured neighbors still match the timeline.
    pub fn matches(&self, timeline: &[HistoricalEvent]) -> bool {
        let fresh = Self::at(timeline, self.index);
        fresh.index == self.index
            && same_id(&fresh.left_event, &self.left_event)
            && same_id(&fresh.right_event, &self.right_event)
    }
}

fn same_id(a: &Option<HistoricalEvent>, b: &Option<HistoricalEvent>) -> bool {
    a.as_ref().map(|e| &e.id) == b.as_ref().map(|e| &e.id)
}
