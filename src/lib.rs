//! Skirmish engine library.
//!
//! Exposes the board model, turn engine, opponent policy, and protocol
//! modules for use by integration tests and the binary entry points.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod movegen;
pub mod policy;
pub mod protocol;
pub mod resolve;
pub mod roster;
pub mod selfplay;

pub use config::GameConfig;
pub use error::{EngineError, Result};
pub use game::Game;
