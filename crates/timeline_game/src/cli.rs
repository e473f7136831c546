//! Command-line interface for the timeline binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use timeline_core::{Category, Difficulty, Era, InteractionMode};
use timeline_game::Filters;

/// Timeline - place historical events in chronological order
#[derive(Parser, Debug)]
#[command(name = "timeline")]
#[command(about = "Historical timeline card game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Event filters shared by every subcommand.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Keep only these difficulties (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub difficulty: Vec<Difficulty>,

    /// Keep only these categories (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub category: Vec<Category>,

    /// Keep only these eras (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub era: Vec<Era>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a hot-seat game on this terminal
    Play {
        /// Event file or catalog directory (with manifest.json)
        #[arg(short, long)]
        events: PathBuf,

        /// TOML settings file
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// RNG seed for a reproducible deal
        #[arg(long)]
        seed: Option<u64>,

        /// Number of players
        #[arg(short, long)]
        players: Option<usize>,

        /// Player names (comma-separated)
        #[arg(long, value_delimiter = ',')]
        names: Vec<String>,

        /// Interaction mode
        #[arg(long)]
        mode: Option<InteractionMode>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Run bot-versus-bot games and report the outcomes
    Simulate {
        /// Event file or catalog directory (with manifest.json)
        #[arg(short, long)]
        events: PathBuf,

        /// TOML settings file
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Number of games to play
        #[arg(short, long, default_value = "10")]
        games: usize,

        /// Number of bots
        #[arg(short, long)]
        players: Option<usize>,

        /// Probability that a bot places correctly
        #[arg(short, long, default_value = "0.7", value_parser = parse_accuracy)]
        accuracy: f64,

        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Load a catalog and summarize it
    Catalog {
        /// Event file or catalog directory (with manifest.json)
        #[arg(short, long)]
        events: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,
    },
}

impl FilterArgs {
    /// Replaces each dimension of `base` that was given on the command line.
    pub fn over(&self, base: Filters) -> Filters {
        let mut filters = base;
        if !self.difficulty.is_empty() {
            filters = filters.with_difficulties(self.difficulty.clone());
        }
        if !self.category.is_empty() {
            filters = filters.with_categories(self.category.clone());
        }
        if !self.era.is_empty() {
            filters = filters.with_eras(self.era.clone());
        }
        filters
    }
}

/// Parses a probability in `0.0..=1.0`.
fn parse_accuracy(value: &str) -> Result<f64, String> {
    let accuracy: f64 = value
        .parse()
        .map_err(|e| format!("`{value}` is not a number: {e}"))?;
    if (0.0..=1.0).contains(&accuracy) {
        Ok(accuracy)
    } else {
        Err(format!("accuracy must be between 0 and 1, got {value}"))
    }
}
