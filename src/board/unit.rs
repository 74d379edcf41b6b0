//! Units and their leveled stats.
//!
//! A unit carries its archetype, the side it fights for, and combat stats
//! derived from its level. Health is the only stat that changes in play.

use serde::{Deserialize, Serialize};

use super::archetype::{Archetype, Side};

/// Maximum health a unit can have.
pub const MAX_HEALTH: f64 = 100.0;

/// Coarse health band used for health-bar colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthLevel {
    Critical,
    Normal,
    High,
}

impl HealthLevel {
    /// Classifies a health value: below 15 is critical, below 50 normal.
    pub fn of(health: f64) -> HealthLevel {
        if health < 15.0 {
            HealthLevel::Critical
        } else if health < 50.0 {
            HealthLevel::Normal
        } else {
            HealthLevel::High
        }
    }
}

/// A combat unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub archetype: Archetype,
    pub side: Side,
    pub level: u32,
    pub attack: f64,
    pub defence: f64,
    pub health: f64,
}

impl Unit {
    /// Creates a unit of the given archetype with stats for `level`.
    ///
    /// Stat curve, monotonic in level:
    /// `attack = base_attack * (1 + 0.25 * (level - 1))` (defence alike) and
    /// `health = min(100, 50 + 25 * (level - 1))`. Level 0 is treated as 1.
    pub fn new(archetype: Archetype, level: u32) -> Unit {
        let level = level.max(1);
        let info = archetype.info();
        let steps = f64::from(level - 1);
        let scale = 1.0 + 0.25 * steps;
        Unit {
            archetype,
            side: info.side,
            level,
            attack: info.base_attack * scale,
            defence: info.base_defence * scale,
            health: (50.0 + 25.0 * steps).min(MAX_HEALTH),
        }
    }

    /// Creates a unit with explicit stats, bypassing the level curve.
    pub fn with_stats(archetype: Archetype, level: u32, attack: f64, defence: f64, health: f64) -> Unit {
        Unit {
            archetype,
            side: archetype.side(),
            level: level.max(1),
            attack,
            defence,
            health: health.min(MAX_HEALTH),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn health_level(&self) -> HealthLevel {
        HealthLevel::of(self.health)
    }

    pub fn movement_radius(&self) -> usize {
        self.archetype.movement_radius()
    }

    pub fn attack_radius(&self) -> usize {
        self.archetype.attack_radius()
    }
}

/// Tooltip-style summary: level, attack, defence, health.
impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} L{} A{} D{} H{}",
            self.archetype, self.level, self.attack, self.defence, self.health
        )
    }
}

/// A unit together with the cell it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionedUnit {
    pub cell: usize,
    pub unit: Unit,
}
