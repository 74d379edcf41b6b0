//! Board occupancy.
//!
//! Holds one slot per cell, so two units can never claim the same cell.
//! All mutations either succeed completely or leave the board untouched.

use std::collections::BTreeSet;

use super::archetype::Side;
use super::geometry::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use super::unit::{PositionedUnit, Unit};
use crate::error::{EngineError, Result};

/// Square grid of unit slots indexed by row-major cell index.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Unit>>,
}

impl Board {
    /// Creates an empty `size` x `size` board for a size known to be sane.
    ///
    /// `size` is capped at [`MAX_BOARD_SIZE`]; use [`Board::try_new`] for
    /// sizes that come from outside.
    pub fn new(size: usize) -> Self {
        let size = size.min(MAX_BOARD_SIZE);
        Board {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Creates an empty board, rejecting sizes outside the supported range.
    pub fn try_new(size: usize) -> Result<Self> {
        check_size(size)?;
        let cells = size
            .checked_mul(size)
            .ok_or_else(|| EngineError::InvalidConfig(format!("board size {} overflows", size)))?;
        Ok(Board {
            size,
            cells: vec![None; cells],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells on the board.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn check(&self, cell: usize) -> Result<()> {
        if cell >= self.cells.len() {
            return Err(EngineError::OutOfBounds {
                cell,
                size: self.size,
            });
        }
        Ok(())
    }

    /// Places a unit on an empty cell.
    pub fn place(&mut self, unit: Unit, cell: usize) -> Result<()> {
        self.check(cell)?;
        if self.cells[cell].is_some() {
            return Err(EngineError::CellOccupied(cell));
        }
        self.cells[cell] = Some(unit);
        Ok(())
    }

    /// Returns the unit on a cell, if any. Off-board cells are empty.
    pub fn unit_at(&self, cell: usize) -> Option<&Unit> {
        self.cells.get(cell).and_then(Option::as_ref)
    }

    pub(crate) fn unit_at_mut(&mut self, cell: usize) -> Option<&mut Unit> {
        self.cells.get_mut(cell).and_then(Option::as_mut)
    }

    pub fn is_empty_cell(&self, cell: usize) -> bool {
        cell < self.cells.len() && self.cells[cell].is_none()
    }

    /// Relocates the unit on `from` to the empty cell `to`.
    pub fn move_unit(&mut self, from: usize, to: usize) -> Result<()> {
        self.check(from)?;
        self.check(to)?;
        if self.cells[from].is_none() {
            return Err(EngineError::NoUnitAtSource(from));
        }
        if self.cells[to].is_some() {
            return Err(EngineError::CellOccupied(to));
        }
        self.cells[to] = self.cells[from].take();
        Ok(())
    }

    /// Removes and returns the unit on a cell. Empty or off-board cells are a no-op.
    pub fn remove_unit(&mut self, cell: usize) -> Option<Unit> {
        self.cells.get_mut(cell).and_then(Option::take)
    }

    /// Returns the occupied cells, optionally restricted to one side.
    pub fn occupied_cells(&self, side: Option<Side>) -> BTreeSet<usize> {
        self.units()
            .filter(|p| side.map_or(true, |s| p.unit.side == s))
            .map(|p| p.cell)
            .collect()
    }

    /// Iterates over all units in row-major cell order.
    pub fn units(&self) -> impl Iterator<Item = PositionedUnit> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(cell, slot)| slot.map(|unit| PositionedUnit { cell, unit }))
    }

    /// Counts the living units of one side.
    pub fn count(&self, side: Side) -> usize {
        self.units().filter(|p| p.unit.side == side).count()
    }

    /// Returns the cells of a side's deployment zone in row-major order:
    /// the first two columns for the ally side, the last two for the enemy.
    pub fn deployment_zone(&self, side: Side) -> Vec<usize> {
        deployment_zone(side, self.size)
    }
}

/// Checks a board dimension lies in `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
pub fn check_size(size: usize) -> Result<()> {
    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        return Err(EngineError::InvalidConfig(format!(
            "board size {} is outside {}..={}",
            size, MIN_BOARD_SIZE, MAX_BOARD_SIZE
        )));
    }
    Ok(())
}

/// Deployment zone cells for a side on a `size` x `size` board.
pub fn deployment_zone(side: Side, size: usize) -> Vec<usize> {
    let cols: Vec<usize> = match side {
        Side::Ally => (0..size.min(2)).collect(),
        Side::Enemy => (size.saturating_sub(2)..size).collect(),
    };
    let mut zone = Vec::with_capacity(size * cols.len());
    for row in 0..size {
        for &col in &cols {
            zone.push(row * size + col);
        }
    }
    zone
}
