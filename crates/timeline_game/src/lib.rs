//! Timeline game host
//!
//! Loads event catalogs, reads TOML settings, and runs the engine from
//! `timeline_core` as a hot-seat terminal game or as bot simulations.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod bot;
mod catalog;
mod settings;
mod simulate;
mod terminal;

// Crate-level exports - Catalog
pub use catalog::{Catalog, CatalogError, Filters, MANIFEST_FILE};

// Crate-level exports - Settings
pub use settings::{Settings, SettingsError};

// Crate-level exports - Bots and simulation
pub use bot::{Bot, correct_slot};
pub use simulate::{GameSummary, MAX_TURNS, run as simulate};

// Crate-level exports - Terminal front-end
pub use terminal::{Command, CommandError, Terminal};
