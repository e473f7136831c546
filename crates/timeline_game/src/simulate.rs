//! Bot-versus-bot games.

use crate::bot::Bot;
use derive_getters::Getters;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use timeline_core::{GameConfig, GameSession, HistoricalEvent, SessionError};
use tracing::{info, instrument, warn};

/// Turn limit after which a game with no possible winner is abandoned.
pub const MAX_TURNS: u32 = 10_000;

/// Outcome of one simulated game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct GameSummary {
    /// Winner names in the order they emptied their hands.
    winners: Vec<String>,
    /// Turns played.
    turns: u32,
    /// Rounds started.
    rounds: u32,
    /// Correct placements.
    correct: usize,
    /// Failed placements.
    wrong: usize,
    /// False if the turn limit was hit.
    finished: bool,
}

/// Plays `games` games between bots of the given accuracy.
///
/// Bots take the seat names from `config`.
#[instrument(skip(pool, config), fields(pool = pool.len(), players = config.player_count()))]
pub fn run(
    pool: Vec<HistoricalEvent>,
    config: &GameConfig,
    games: usize,
    accuracy: f64,
    seed: Option<u64>,
) -> Result<Vec<GameSummary>, SessionError> {
    let mut session = GameSession::new(pool, seed);
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
        None => ChaCha8Rng::seed_from_u64(rand::random()),
    };
    let bots: Vec<Bot> = (0..*config.player_count())
        .map(|seat| Bot::new(config.player_name(seat), accuracy))
        .collect();

    let mut summaries = Vec::with_capacity(games);
    for game in 0..games {
        session.start(config.clone())?;
        let (mut correct, mut wrong) = (0, 0);

        loop {
            let Some(state) = session.state() else { break };
            if state.is_over() || state.turn_number() > MAX_TURNS {
                break;
            }
            let seat = state.current_player_index();
            match bots.get(seat).and_then(|bot| bot.pick_intent(state, &mut rng)) {
                Some(intent) => match session.apply(&intent)? {
                    Some(result) if result.success => correct += 1,
                    Some(_) => wrong += 1,
                    None => {}
                },
                None => session.pass()?,
            }
        }

        let Some(state) = session.state() else { break };
        let summary = GameSummary {
            winners: state.standings().into_iter().map(|p| p.name).collect(),
            turns: state.turn_number().saturating_sub(1),
            rounds: state.round_number(),
            correct,
            wrong,
            finished: state.is_over(),
        };
        if summary.finished {
            info!(
                game,
                winners = ?summary.winners,
                turns = summary.turns,
                correct,
                wrong,
                "Game finished"
            );
        } else {
            warn!(game, turns = summary.turns, "Game abandoned at turn limit");
        }
        summaries.push(summary);
    }
    Ok(summaries)
}
