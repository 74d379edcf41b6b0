//! Attack resolution.
//!
//! Applies one attack to the board as a single step: damage is subtracted
//! and a defender left with no health is removed before control returns.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::{Board, Unit};
use crate::error::{EngineError, Result};

/// Fraction of raw attack that always gets through.
pub const DAMAGE_FLOOR: f64 = 0.1;

/// Damage dealt by `attacker` to `defender`:
/// `max(attack - defence, attack * 0.1)`.
pub fn damage(attacker: &Unit, defender: &Unit) -> f64 {
    (attacker.attack - defender.defence).max(attacker.attack * DAMAGE_FLOOR)
}

/// Result of one resolved attack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub attacker: usize,
    pub target: usize,
    pub damage: f64,
    pub remaining_health: f64,
    pub target_died: bool,
}

/// Resolves an attack from the unit on `attacker` against the unit on `target`.
///
/// Range and side legality are the caller's concern; this only requires both
/// cells to hold units.
pub fn resolve_attack(board: &mut Board, attacker: usize, target: usize) -> Result<Resolution> {
    let striker = *board
        .unit_at(attacker)
        .ok_or(EngineError::NoUnitAtSource(attacker))?;
    let defender = board
        .unit_at_mut(target)
        .ok_or(EngineError::IllegalAttackTarget(target))?;

    let dealt = damage(&striker, defender);
    defender.health -= dealt;
    let remaining_health = defender.health;
    let target_died = !defender.is_alive();
    let victim = defender.archetype;

    if target_died {
        board.remove_unit(target);
        info!(attacker, target, damage = dealt, %victim, "unit destroyed");
    } else {
        info!(attacker, target, damage = dealt, remaining_health, "attack resolved");
    }

    Ok(Resolution {
        attacker,
        target,
        damage: dealt,
        remaining_health,
        target_died,
    })
}
