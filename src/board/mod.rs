//! Board representation and unit types.
//!
//! Contains grid geometry, the archetype catalog, units, and the occupancy
//! grid that the turn engine mutates.

pub mod archetype;
pub mod geometry;
pub mod state;
pub mod unit;

pub use archetype::{lookup, Archetype, ArchetypeInfo, Side, UnitClass, ALL_ARCHETYPES, CATALOG};
pub use geometry::{
    cells_within, chebyshev_distance, to_index, to_row_col, within_radius, DEFAULT_BOARD_SIZE,
    MAX_BOARD_SIZE, MIN_BOARD_SIZE,
};
pub use state::{check_size, deployment_zone, Board};
pub use unit::{HealthLevel, PositionedUnit, Unit, MAX_HEALTH};
