//! Read-only views of a game for rendering and saving.
//!
//! A snapshot is a flat, order-independent list of unit records plus the side
//! on turn. It serializes with serde; storing it is left to the caller.

use serde::{Deserialize, Serialize};

use crate::board::{Archetype, Board, HealthLevel, PositionedUnit, Side, Unit};

/// One unit as seen from outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub cell: usize,
    pub archetype: Archetype,
    pub side: Side,
    pub level: u32,
    pub attack: f64,
    pub defence: f64,
    pub health: f64,
    pub health_level: HealthLevel,
}

impl From<PositionedUnit> for UnitRecord {
    fn from(p: PositionedUnit) -> Self {
        UnitRecord {
            cell: p.cell,
            archetype: p.unit.archetype,
            side: p.unit.side,
            level: p.unit.level,
            attack: p.unit.attack,
            defence: p.unit.defence,
            health: p.unit.health,
            health_level: p.unit.health_level(),
        }
    }
}

impl UnitRecord {
    /// Rebuilds the unit this record describes.
    pub fn to_unit(&self) -> Unit {
        Unit {
            archetype: self.archetype,
            side: self.side,
            level: self.level,
            attack: self.attack,
            defence: self.defence,
            health: self.health,
        }
    }
}

/// Complete observable state of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: usize,
    pub turn: Side,
    #[serde(default)]
    pub winner: Option<Side>,
    pub units: Vec<UnitRecord>,
}

impl BoardSnapshot {
    /// Captures the board and turn state.
    pub fn capture(board: &Board, turn: Side, winner: Option<Side>) -> Self {
        BoardSnapshot {
            size: board.size(),
            turn,
            winner,
            units: board.units().map(UnitRecord::from).collect(),
        }
    }

    /// Returns the record for the unit on `cell`, if any.
    pub fn unit_at(&self, cell: usize) -> Option<&UnitRecord> {
        self.units.iter().find(|u| u.cell == cell)
    }

    /// Returns the records of one side.
    pub fn side_units(&self, side: Side) -> impl Iterator<Item = &UnitRecord> + '_ {
        self.units.iter().filter(move |u| u.side == side)
    }
}
