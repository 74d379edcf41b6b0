//! Line protocol command parser.
//!
//! Parses incoming text commands into structured `Command` variants that the
//! driver loop dispatches on. One command per line, tokens separated by
//! whitespace; `load` takes the rest of the line as a JSON snapshot.

use tracing::warn;

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Start a new game, optionally with a fixed seed.
    NewGame { seed: Option<u64> },

    /// Select the unit on a cell.
    Select { cell: usize },

    /// Move the selected unit to a cell.
    Move { cell: usize },

    /// Attack the unit on a cell with the selected unit.
    Attack { cell: usize },

    /// A raw click on a cell, interpreted by occupant.
    Click { cell: usize },

    /// Print the current snapshot as JSON.
    Snapshot,

    /// Replace the current game with a JSON snapshot.
    Load { json: String },

    /// Terminate the driver.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    match tokens[0] {
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "snapshot" => Some(Command::Snapshot),

        "newgame" => parse_newgame(&tokens),
        "select" => parse_cell(&tokens).map(|cell| Command::Select { cell }),
        "move" => parse_cell(&tokens).map(|cell| Command::Move { cell }),
        "attack" => parse_cell(&tokens).map(|cell| Command::Attack { cell }),
        "click" => parse_cell(&tokens).map(|cell| Command::Click { cell }),
        "load" => parse_load(trimmed),

        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `newgame [seed]`.
fn parse_newgame(tokens: &[&str]) -> Option<Command> {
    match tokens.get(1) {
        None => Some(Command::NewGame { seed: None }),
        Some(s) => match s.parse::<u64>() {
            Ok(seed) => Some(Command::NewGame { seed: Some(seed) }),
            Err(_) => {
                warn!("invalid seed value: '{}'", s);
                None
            }
        },
    }
}

/// Parses the cell argument of `<verb> <cell>`.
fn parse_cell(tokens: &[&str]) -> Option<usize> {
    let Some(arg) = tokens.get(1) else {
        warn!("malformed {}: expected '{} <cell>'", tokens[0], tokens[0]);
        return None;
    };
    match arg.parse::<usize>() {
        Ok(cell) => Some(cell),
        Err(_) => {
            warn!("invalid cell index: '{}'", arg);
            None
        }
    }
}

/// Parses `load <json>`; the JSON may contain spaces.
fn parse_load(trimmed: &str) -> Option<Command> {
    let json = trimmed.strip_prefix("load").unwrap_or_default().trim();
    if json.is_empty() {
        warn!("malformed load: expected 'load <snapshot json>'");
        return None;
    }
    Some(Command::Load {
        json: json.to_string(),
    })
}
