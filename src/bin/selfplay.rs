//! Self-play CLI.
//!
//! Pits the opponent policy against itself and writes each game as a JSON
//! line.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use skirmish::config::GameConfig;
use skirmish::selfplay::{self, SelfPlayConfig};

#[derive(Parser, Debug)]
#[command(name = "selfplay")]
#[command(about = "Play policy-vs-policy games and write them as JSONL")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Actions before an undecided game is abandoned
    #[arg(long, default_value_t = 500)]
    max_turns: usize,

    /// Worker threads
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Run seed; omitted draws one from entropy
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with game setup parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Suppress the summary
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let game = match &args.config {
        Some(path) => match GameConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };
    let config = SelfPlayConfig {
        num_games: args.games,
        max_turns: args.max_turns,
        threads: args.threads,
        seed: args.seed,
        game,
    };

    let games = match selfplay::run_self_play(&config) {
        Ok(games) => games,
        Err(e) => {
            eprintln!("self-play failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let written = match &args.output {
        Some(path) => File::create(path).and_then(|f| selfplay::write_jsonl(&games, &mut BufWriter::new(f))),
        None => selfplay::write_jsonl(&games, &mut io::stdout().lock()),
    };
    if let Err(e) = written {
        eprintln!("failed to write games: {}", e);
        return ExitCode::FAILURE;
    }

    if !args.quiet {
        eprintln!("{}", selfplay::summarize(&games));
    }
    ExitCode::SUCCESS
}
