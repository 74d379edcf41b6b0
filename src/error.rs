//! Engine error kinds.
//!
//! Every rejected operation returns one of these and leaves the board and
//! turn state exactly as they were before the call.

use crate::board::Side;

/// Errors returned by board, roster, and turn-engine operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("cell {cell} is outside the {size}x{size} board")]
    OutOfBounds { cell: usize, size: usize },

    #[error("index {index} is not a valid coordinate on a {size}x{size} board")]
    InvalidIndex { index: usize, size: usize },

    #[error("unknown archetype: '{0}'")]
    UnknownArchetype(String),

    #[error("cell {0} is already occupied")]
    CellOccupied(usize),

    #[error("no unit at cell {0}")]
    NoUnitAtSource(usize),

    #[error("the unit at cell {cell} cannot act while it is {turn}'s turn")]
    NotYourTurn { cell: usize, turn: Side },

    #[error("select one of your own units first")]
    NoActiveSelection,

    #[error("cell {0} is not a legal move target")]
    IllegalMoveTarget(usize),

    #[error("cell {0} is not a legal attack target")]
    IllegalAttackTarget(usize),

    #[error("the game is over, {winner} won")]
    GameAlreadyOver { winner: Side },

    #[error("invalid game setup: {0}")]
    InvalidConfig(String),

    #[error("{side} deployment zone has {available} free cells, {requested} requested")]
    ZoneExhausted {
        side: Side,
        requested: usize,
        available: usize,
    },
}

impl EngineError {
    /// Returns true for errors a front end should show to the player as
    /// guidance rather than treat as a programming error.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            EngineError::NoActiveSelection | EngineError::NotYourTurn { .. }
        )
    }

    /// Short stable identifier used by the line protocol.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::OutOfBounds { .. } => "out_of_bounds",
            EngineError::InvalidIndex { .. } => "invalid_index",
            EngineError::UnknownArchetype(_) => "unknown_archetype",
            EngineError::CellOccupied(_) => "cell_occupied",
            EngineError::NoUnitAtSource(_) => "no_unit_at_source",
            EngineError::NotYourTurn { .. } => "not_your_turn",
            EngineError::NoActiveSelection => "no_active_selection",
            EngineError::IllegalMoveTarget(_) => "illegal_move_target",
            EngineError::IllegalAttackTarget(_) => "illegal_attack_target",
            EngineError::GameAlreadyOver { .. } => "game_already_over",
            EngineError::InvalidConfig(_) => "invalid_config",
            EngineError::ZoneExhausted { .. } => "zone_exhausted",
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
