//! Unit archetypes and the static catalog of their ranges and base stats.
//!
//! Each archetype fixes a movement radius, an attack radius, and the side it
//! fights for. The three classes mirror each other across the two sides, and
//! within a class movement and attack radii are inversely correlated.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// One of the two opposing sides.
///
/// `Ally` is the human-controlled side; `Enemy` is driven by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Ally,
    Enemy,
}

impl Side {
    /// Returns the other side.
    pub const fn opponent(self) -> Side {
        match self {
            Side::Ally => Side::Enemy,
            Side::Enemy => Side::Ally,
        }
    }

    /// Returns the lowercase protocol name.
    pub const fn name(self) -> &'static str {
        match self {
            Side::Ally => "ally",
            Side::Enemy => "enemy",
        }
    }

    /// Parses a side from its protocol name.
    pub fn from_name(s: &str) -> Option<Side> {
        match s.to_ascii_lowercase().as_str() {
            "ally" | "player" => Some(Side::Ally),
            "enemy" | "opponent" => Some(Side::Enemy),
            _ => None,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Combat class shared by one archetype on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitClass {
    Melee,
    Ranged,
    Caster,
}

/// A named unit kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Swordsman,
    Bowman,
    Magician,
    Undead,
    Vampire,
    Daemon,
}

/// All archetypes in catalog order.
pub const ALL_ARCHETYPES: [Archetype; 6] = [
    Archetype::Swordsman,
    Archetype::Bowman,
    Archetype::Magician,
    Archetype::Undead,
    Archetype::Vampire,
    Archetype::Daemon,
];

/// Catalog entry for an archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeInfo {
    pub movement_radius: usize,
    pub attack_radius: usize,
    pub side: Side,
    pub class: UnitClass,
    pub base_attack: f64,
    pub base_defence: f64,
}

const fn info(
    class: UnitClass,
    side: Side,
    base_attack: f64,
    base_defence: f64,
) -> ArchetypeInfo {
    let (movement_radius, attack_radius) = match class {
        UnitClass::Melee => (4, 1),
        UnitClass::Ranged => (2, 2),
        UnitClass::Caster => (1, 4),
    };
    ArchetypeInfo {
        movement_radius,
        attack_radius,
        side,
        class,
        base_attack,
        base_defence,
    }
}

/// Static catalog indexed by `Archetype as usize`.
pub static CATALOG: [ArchetypeInfo; 6] = [
    info(UnitClass::Melee, Side::Ally, 40.0, 10.0),
    info(UnitClass::Ranged, Side::Ally, 25.0, 25.0),
    info(UnitClass::Caster, Side::Ally, 10.0, 40.0),
    info(UnitClass::Melee, Side::Enemy, 40.0, 10.0),
    info(UnitClass::Ranged, Side::Enemy, 25.0, 25.0),
    info(UnitClass::Caster, Side::Enemy, 10.0, 10.0),
];

impl Archetype {
    /// Returns the catalog entry for this archetype.
    pub fn info(self) -> &'static ArchetypeInfo {
        &CATALOG[self as usize]
    }

    pub fn movement_radius(self) -> usize {
        self.info().movement_radius
    }

    pub fn attack_radius(self) -> usize {
        self.info().attack_radius
    }

    pub fn side(self) -> Side {
        self.info().side
    }

    pub fn class(self) -> UnitClass {
        self.info().class
    }

    /// Returns the canonical display name.
    pub const fn name(self) -> &'static str {
        match self {
            Archetype::Swordsman => "Swordsman",
            Archetype::Bowman => "Bowman",
            Archetype::Magician => "Magician",
            Archetype::Undead => "Undead",
            Archetype::Vampire => "Vampire",
            Archetype::Daemon => "Daemon",
        }
    }

    /// Looks up an archetype by name, ignoring case.
    pub fn from_name(name: &str) -> Result<Archetype> {
        ALL_ARCHETYPES
            .iter()
            .copied()
            .find(|a| a.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| EngineError::UnknownArchetype(name.to_string()))
    }

    /// Returns the archetype of the given class fighting for the given side.
    pub fn of(class: UnitClass, side: Side) -> Archetype {
        match (class, side) {
            (UnitClass::Melee, Side::Ally) => Archetype::Swordsman,
            (UnitClass::Ranged, Side::Ally) => Archetype::Bowman,
            (UnitClass::Caster, Side::Ally) => Archetype::Magician,
            (UnitClass::Melee, Side::Enemy) => Archetype::Undead,
            (UnitClass::Ranged, Side::Enemy) => Archetype::Vampire,
            (UnitClass::Caster, Side::Enemy) => Archetype::Daemon,
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Looks up the catalog entry for an archetype name.
pub fn lookup(name: &str) -> Result<&'static ArchetypeInfo> {
    Archetype::from_name(name).map(Archetype::info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_radii() {
        assert_eq!(lookup("Swordsman").unwrap().movement_radius, 4);
        assert_eq!(lookup("Swordsman").unwrap().attack_radius, 1);
        assert_eq!(lookup("Vampire").unwrap().movement_radius, 2);
        assert_eq!(lookup("Vampire").unwrap().attack_radius, 2);
        assert_eq!(lookup("Daemon").unwrap().movement_radius, 1);
        assert_eq!(lookup("Daemon").unwrap().attack_radius, 4);
    }

    #[test]
    fn movement_and_reach_are_inverse() {
        for a in ALL_ARCHETYPES {
            for b in ALL_ARCHETYPES {
                if a.movement_radius() > b.movement_radius() {
                    assert!(a.attack_radius() < b.attack_radius(), "{a} vs {b}");
                }
            }
        }
    }

    #[test]
    fn classes_mirror_across_sides() {
        for class in [UnitClass::Melee, UnitClass::Ranged, UnitClass::Caster] {
            let ally = Archetype::of(class, Side::Ally);
            let enemy = Archetype::of(class, Side::Enemy);
            assert_eq!(ally.side(), Side::Ally);
            assert_eq!(enemy.side(), Side::Enemy);
            assert_eq!(ally.movement_radius(), enemy.movement_radius());
            assert_eq!(ally.attack_radius(), enemy.attack_radius());
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Archetype::from_name("bowman").unwrap(), Archetype::Bowman);
        assert_eq!(Archetype::from_name(" UNDEAD ").unwrap(), Archetype::Undead);
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            lookup("Dragon"),
            Err(EngineError::UnknownArchetype("Dragon".to_string()))
        );
    }

    #[test]
    fn side_names_roundtrip() {
        for side in [Side::Ally, Side::Enemy] {
            assert_eq!(Side::from_name(side.name()), Some(side));
            assert_eq!(side.opponent().opponent(), side);
        }
        assert_eq!(Side::from_name("player"), Some(Side::Ally));
        assert_eq!(Side::from_name("nobody"), None);
    }
}
