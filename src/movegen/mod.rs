//! Legal target generation.
//!
//! Computes, for the unit on a given cell, the empty cells it may move to,
//! the enemy-held cells it may attack, and the other friendly cells its side
//! may switch selection to. Ranges are pure Chebyshev radii from the catalog;
//! nothing blocks line of movement or line of sight.

use std::collections::BTreeSet;

use crate::board::{cells_within, Board};

/// Returns the empty cells within the unit's movement radius.
///
/// Returns an empty set if no unit stands on `cell`.
pub fn move_targets(board: &Board, cell: usize) -> BTreeSet<usize> {
    let Some(unit) = board.unit_at(cell) else {
        return BTreeSet::new();
    };
    cells_within(cell, board.size(), unit.movement_radius())
        .into_iter()
        .filter(|&c| board.is_empty_cell(c))
        .collect()
}

/// Returns the cells held by the opposing side within the unit's attack radius.
pub fn attack_targets(board: &Board, cell: usize) -> BTreeSet<usize> {
    let Some(unit) = board.unit_at(cell) else {
        return BTreeSet::new();
    };
    let foe = unit.side.opponent();
    cells_within(cell, board.size(), unit.attack_radius())
        .into_iter()
        .filter(|&c| board.unit_at(c).is_some_and(|u| u.side == foe))
        .collect()
}

/// Returns the cells of the unit's own side other than `cell` itself.
///
/// These are never move destinations; they only allow switching selection.
pub fn reselect_targets(board: &Board, cell: usize) -> BTreeSet<usize> {
    let Some(unit) = board.unit_at(cell) else {
        return BTreeSet::new();
    };
    let mut cells = board.occupied_cells(Some(unit.side));
    cells.remove(&cell);
    cells
}
