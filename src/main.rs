//! Skirmish -- a tactical grid combat engine driven over a line protocol.
//!
//! Reads commands from stdin and writes responses to stdout. Logs go to
//! stderr and are filtered with `RUST_LOG`.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use skirmish::config::GameConfig;
use skirmish::engine::Engine;
use skirmish::protocol::parse_command;

#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Turn-based tactical grid combat engine")]
struct Args {
    /// TOML file with game setup parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for every new game that does not give its own
    #[arg(long)]
    seed: Option<u64>,

    /// Disable the opponent's automatic reply
    #[arg(long)]
    no_auto_reply: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => match GameConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.no_auto_reply {
        config.auto_reply = false;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new(config);

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let Some(cmd) = parse_command(&line) else {
            continue;
        };
        match engine.handle(cmd, &mut out) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                tracing::error!("output failed: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
