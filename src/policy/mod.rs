//! Automated play for the side not controlled by the player.

pub mod opponent;

pub use opponent::{choose, Context, Decision};
