//! Policy-versus-policy games for balance checking.
//!
//! Both sides are driven by the opponent policy until one is wiped out or the
//! turn cap is hit. Games are independent and seeded from the run seed plus
//! their index, so a run is reproducible regardless of thread count.

use std::fmt;
use std::io::Write;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::board::Side;
use crate::config::GameConfig;
use crate::error::EngineError;
use crate::game::{BoardSnapshot, Game, TurnAction};

/// Errors that abort a self-play run.
#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("failed to build thread pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for a self-play run.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Actions after which an undecided game is abandoned.
    pub max_turns: usize,
    /// Worker threads; 1 plays games on the calling thread.
    pub threads: usize,
    /// Run seed. `None` draws one from entropy.
    pub seed: Option<u64>,
    /// Setup used for every game. Its own seed and auto-reply are ignored.
    pub game: GameConfig,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            max_turns: 500,
            threads: 4,
            seed: None,
            game: GameConfig::default(),
        }
    }
}

/// A finished self-play game.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub seed: u64,
    /// `None` when the turn cap was reached first.
    pub winner: Option<Side>,
    pub turns: usize,
    pub actions: Vec<TurnAction>,
    pub final_snapshot: BoardSnapshot,
}

/// Plays one game to completion or to the turn cap.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, seed: u64) -> Result<GameRecord, EngineError> {
    let mut setup = config.game.clone();
    setup.seed = Some(seed);
    setup.auto_reply = false;

    let mut game = Game::new(&setup)?;
    while !game.is_over() && game.history().len() < config.max_turns {
        match game.play_policy_turn() {
            Ok(_) => {}
            Err(EngineError::GameAlreadyOver { .. }) => break,
            Err(e) => return Err(e),
        }
    }

    debug!(game_id, winner = ?game.winner(), turns = game.history().len(), "self-play game finished");
    Ok(GameRecord {
        game_id,
        seed,
        winner: game.winner(),
        turns: game.history().len(),
        actions: game.history().to_vec(),
        final_snapshot: game.snapshot(),
    })
}

/// Plays `config.num_games` games and returns their records in game order.
///
/// When `config.threads > 1`, games run concurrently on a rayon pool.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    config.game.validate()?;
    let base = config.seed.unwrap_or_else(rand::random);
    let start = Instant::now();

    let games = if config.threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()?;
        pool.install(|| {
            (0..config.num_games)
                .into_par_iter()
                .map(|i| play_game(config, i, base.wrapping_add(i as u64)))
                .collect::<Result<Vec<_>, _>>()
        })?
    } else {
        (0..config.num_games)
            .map(|i| play_game(config, i, base.wrapping_add(i as u64)))
            .collect::<Result<Vec<_>, _>>()?
    };

    info!(
        games = games.len(),
        threads = config.threads,
        seed = base,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "self-play run complete"
    );
    Ok(games)
}

/// Writes game records as JSONL, one object per line.
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Aggregate results of a run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub games: usize,
    pub ally_wins: usize,
    pub enemy_wins: usize,
    pub unfinished: usize,
    pub avg_turns: f64,
}

pub fn summarize(games: &[GameRecord]) -> Summary {
    let mut summary = Summary {
        games: games.len(),
        ..Summary::default()
    };
    let mut total_turns = 0usize;
    for game in games {
        total_turns += game.turns;
        match game.winner {
            Some(Side::Ally) => summary.ally_wins += 1,
            Some(Side::Enemy) => summary.enemy_wins += 1,
            None => summary.unfinished += 1,
        }
    }
    summary.avg_turns = total_turns as f64 / games.len().max(1) as f64;
    summary
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = |n: usize| 100.0 * n as f64 / self.games.max(1) as f64;
        writeln!(f, "=== Self-Play Summary ===")?;
        writeln!(f, "Games: {}", self.games)?;
        writeln!(f, "Avg turns/game: {:.1}", self.avg_turns)?;
        writeln!(f, "  ally: {} ({:.1}%)", self.ally_wins, pct(self.ally_wins))?;
        writeln!(f, " enemy: {} ({:.1}%)", self.enemy_wins, pct(self.enemy_wins))?;
        write!(f, "Unfinished: {}", self.unfinished)
    }
}
