//! Timeline - terminal card game
//!
//! Hot-seat play, bot simulations and catalog inspection.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, FilterArgs};
use std::io;
use std::path::Path;
use timeline_core::{GameSession, format_year};
use timeline_game::{Catalog, Filters, Settings, Terminal};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,timeline_core=debug")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            events,
            settings,
            seed,
            players,
            names,
            mode,
            filters,
        } => {
            let settings = load_settings(settings.as_deref())?
                .with_player_count(players)
                .with_player_names(names)
                .with_seed(seed)
                .with_mode(mode);
            run_play(&events, settings, &filters)
        }
        Command::Simulate {
            events,
            settings,
            games,
            players,
            accuracy,
            seed,
            filters,
        } => {
            let settings = load_settings(settings.as_deref())?
                .with_player_count(players)
                .with_seed(seed);
            run_simulate(&events, settings, &filters, games, accuracy)
        }
        Command::Catalog { events, filters } => run_catalog(&events, &filters),
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    Ok(match path {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    })
}

/// Loads the catalog and applies settings filters, then CLI filters.
#[instrument(skip(settings, filters))]
fn load_pool(
    events: &Path,
    settings: &Settings,
    filters: &FilterArgs,
) -> Result<Vec<timeline_core::HistoricalEvent>> {
    let catalog = Catalog::load(events)?;
    let config = settings.to_config()?;
    let pool = catalog.deal_pool(&filters.over(Filters::from_config(&config)), &config)?;
    info!(available = catalog.len(), selected = pool.len(), "Event pool ready");
    Ok(pool)
}

/// Run an interactive game on stdin/stdout
fn run_play(events: &Path, settings: Settings, filters: &FilterArgs) -> Result<()> {
    let pool = load_pool(events, &settings, filters)?;
    let config = settings.to_config()?;
    let session = GameSession::new(pool, *settings.seed());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut terminal = Terminal::new(
        stdin.lock(),
        stdout.lock(),
        session,
        config,
        settings.interaction_mode(),
    );
    terminal.run()
}

/// Run bot-versus-bot games and print a summary
fn run_simulate(
    events: &Path,
    settings: Settings,
    filters: &FilterArgs,
    games: usize,
    accuracy: f64,
) -> Result<()> {
    let pool = load_pool(events, &settings, filters)?;
    let config = settings.to_config()?;
    let summaries = timeline_game::simulate(pool, &config, games, accuracy, *settings.seed())?;

    let finished = summaries.iter().filter(|s| *s.finished()).count();
    let turns: u32 = summaries.iter().map(|s| *s.turns()).sum();
    for (game, summary) in summaries.iter().enumerate() {
        println!(
            "Game {}: winners [{}] after {} turns ({} correct, {} wrong)",
            game + 1,
            summary.winners().join(", "),
            summary.turns(),
            summary.correct(),
            summary.wrong()
        );
    }
    if !summaries.is_empty() {
        println!(
            "{} of {} games finished, {:.1} turns on average",
            finished,
            summaries.len(),
            f64::from(turns) / summaries.len() as f64
        );
    }
    Ok(())
}

/// Summarize a catalog
fn run_catalog(events: &Path, filters: &FilterArgs) -> Result<()> {
    let catalog = Catalog::load(events)?;
    let selected = Catalog::from_events(catalog.filter(&filters.over(Filters::new())));

    println!("{} events loaded, {} selected", catalog.len(), selected.len());
    println!("By category:");
    for (category, count) in selected.count_by_category() {
        println!("  {:<32} {}", category.label(), count);
    }
    println!("By difficulty:");
    for (difficulty, count) in selected.count_by_difficulty() {
        println!("  {:<32} {}", difficulty, count);
    }
    println!("By era:");
    for (era, count) in selected.count_by_era() {
        println!("  {:<32} {}", era, count);
    }
    if let (Some(first), Some(last)) = (
        selected.events().iter().min_by_key(|e| e.year),
        selected.events().iter().max_by_key(|e| e.year),
    ) {
        println!(
            "Span: {} ({}) to {} ({})",
            first.display_name,
            format_year(first.year),
            last.display_name,
            format_year(last.year)
        );
    }
    Ok(())
}
