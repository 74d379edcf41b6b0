//! Text protocol for driving a game over stdin/stdout.
//!
//! Commands arrive one per line; responses are plain lines, with snapshots
//! serialized as JSON.

pub mod parser;

pub use parser::{parse_command, Command};
