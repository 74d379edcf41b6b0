//! Roster generation and initial deployment.
//!
//! Builds a side's starting units from archetype names and a level cap, and
//! scatters them over the side's deployment zone without reusing a cell.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::board::{Archetype, Board, Side, Unit};
use crate::error::{EngineError, Result};

/// Parses a list of archetype names.
pub fn parse_archetypes<S: AsRef<str>>(names: &[S]) -> Result<Vec<Archetype>> {
    names
        .iter()
        .map(|n| Archetype::from_name(n.as_ref()))
        .collect()
}

/// Generates `count` units, each with a uniformly random archetype from
/// `names` and a uniformly random level in `1..=max_level`.
///
/// Duplicate archetypes are allowed.
pub fn generate_roster<S: AsRef<str>>(
    names: &[S],
    count: usize,
    max_level: u32,
    rng: &mut impl Rng,
) -> Result<Vec<Unit>> {
    let archetypes = parse_archetypes(names)?;
    generate_from(&archetypes, count, max_level, rng)
}

/// Same as [`generate_roster`] with already-parsed archetypes.
pub fn generate_from(
    archetypes: &[Archetype],
    count: usize,
    max_level: u32,
    rng: &mut impl Rng,
) -> Result<Vec<Unit>> {
    if archetypes.is_empty() {
        return Err(EngineError::InvalidConfig("roster needs at least one archetype".into()));
    }
    if max_level == 0 {
        return Err(EngineError::InvalidConfig("max level must be at least 1".into()));
    }

    let units = (0..count)
        .filter_map(|_| {
            let archetype = *archetypes.choose(&mut *rng)?;
            let level = rng.gen_range(1..=max_level);
            Some(Unit::new(archetype, level))
        })
        .collect();
    Ok(units)
}

/// Places `units` on random free cells of `side`'s deployment zone.
///
/// Each unit draws uniformly from the cells not yet claimed. Fails without
/// touching the board if the zone lacks room or a unit fights for the other side.
pub fn deploy(board: &mut Board, side: Side, units: &[Unit], rng: &mut impl Rng) -> Result<Vec<usize>> {
    if let Some(stray) = units.iter().find(|u| u.side != side) {
        return Err(EngineError::InvalidConfig(format!(
            "{} fights for {}, not {}",
            stray.archetype, stray.side, side
        )));
    }

    let mut pool: Vec<usize> = board
        .deployment_zone(side)
        .into_iter()
        .filter(|&c| board.is_empty_cell(c))
        .collect();
    if units.len() > pool.len() {
        return Err(EngineError::ZoneExhausted {
            side,
            requested: units.len(),
            available: pool.len(),
        });
    }

    let mut placed = Vec::with_capacity(units.len());
    for unit in units {
        let cell = pool.remove(rng.gen_range(0..pool.len()));
        board.place(*unit, cell)?;
        placed.push(cell);
    }
    debug!(%side, cells = ?placed, "deployed roster");
    Ok(placed)
}
