//! Square-grid geometry.
//!
//! Cells are addressed by a linear row-major index in `0..size * size`.
//! All range rules use the Chebyshev metric: a cell is within radius `r`
//! when both its row and column distances are at most `r`.

use crate::error::{EngineError, Result};

/// Default board dimension.
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Smallest board that holds both deployment zones apart.
pub const MIN_BOARD_SIZE: usize = 4;

/// Largest supported board dimension.
pub const MAX_BOARD_SIZE: usize = 64;

/// Converts a linear cell index into `(row, col)`.
pub fn to_row_col(index: usize, size: usize) -> Result<(usize, usize)> {
    if index >= size * size {
        return Err(EngineError::InvalidIndex { index, size });
    }
    Ok((index / size, index % size))
}

/// Converts `(row, col)` into a linear cell index.
pub fn to_index(row: usize, col: usize, size: usize) -> Result<usize> {
    if row >= size || col >= size {
        return Err(EngineError::InvalidIndex {
            index: row.saturating_mul(size).saturating_add(col),
            size,
        });
    }
    Ok(row * size + col)
}

/// Returns the Chebyshev distance between two cells, or `None` if either
/// index is off the board.
pub fn chebyshev_distance(a: usize, b: usize, size: usize) -> Option<usize> {
    let (ra, ca) = to_row_col(a, size).ok()?;
    let (rb, cb) = to_row_col(b, size).ok()?;
    Some(ra.abs_diff(rb).max(ca.abs_diff(cb)))
}

/// Returns true if `b` lies within `radius` cells of `a` in every direction.
///
/// Off-board indices are never within range of anything.
pub fn within_radius(a: usize, b: usize, size: usize, radius: usize) -> bool {
    chebyshev_distance(a, b, size).is_some_and(|d| d <= radius)
}

/// Enumerates the cells of the square of the given radius around `center`,
/// clipped to the board, in row-major order. The center itself is included.
pub fn cells_within(center: usize, size: usize, radius: usize) -> Vec<usize> {
    let Ok((row, col)) = to_row_col(center, size) else {
        return Vec::new();
    };
    let rows = row.saturating_sub(radius)..=(row + radius).min(size - 1);
    let cols = col.saturating_sub(radius)..=(col + radius).min(size - 1);

    let mut cells = Vec::with_capacity(rows.clone().count() * cols.clone().count());
    for r in rows {
        for c in cols.clone() {
            cells.push(r * size + c);
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn row_col_of_corners() {
        assert_eq!(to_row_col(0, 8).unwrap(), (0, 0));
        assert_eq!(to_row_col(7, 8).unwrap(), (0, 7));
        assert_eq!(to_row_col(56, 8).unwrap(), (7, 0));
        assert_eq!(to_row_col(63, 8).unwrap(), (7, 7));
    }

    #[test]
    fn row_col_rejects_off_board() {
        assert_eq!(
            to_row_col(64, 8),
            Err(EngineError::InvalidIndex { index: 64, size: 8 })
        );
        assert!(to_index(8, 0, 8).is_err());
        assert!(to_index(0, 8, 8).is_err());
    }

    #[test]
    fn diagonal_neighbour_is_distance_one() {
        assert_eq!(chebyshev_distance(0, 9, 8), Some(1));
        assert!(within_radius(0, 9, 8, 1));
        assert!(!within_radius(0, 18, 8, 1));
    }

    #[test]
    fn row_wrap_is_not_adjacency() {
        // Cell 7 is the end of row 0, cell 8 the start of row 1.
        assert_eq!(chebyshev_distance(7, 8, 8), Some(7));
        assert!(!within_radius(7, 8, 8, 1));
    }

    #[test]
    fn off_board_is_never_within_radius() {
        assert!(!within_radius(0, 64, 8, 100));
        assert!(!within_radius(64, 64, 8, 0));
    }

    #[test]
    fn cells_within_clips_at_corner() {
        let cells = cells_within(0, 8, 1);
        assert_eq!(cells, vec![0, 1, 8, 9]);
    }

    #[test]
    fn cells_within_full_square_in_middle() {
        let cells = cells_within(27, 8, 1);
        assert_eq!(cells, vec![18, 19, 20, 26, 27, 28, 34, 35, 36]);
        assert_eq!(cells_within(27, 8, 4).len(), 64);
        assert_eq!(cells_within(27, 8, 2).len(), 25);
    }

    #[test]
    fn cells_within_off_board_is_empty() {
        assert!(cells_within(99, 8, 2).is_empty());
    }

    proptest! {
        #[test]
        fn index_roundtrip(size in 1usize..16, seed in any::<usize>()) {
            let index = seed % (size * size);
            let (r, c) = to_row_col(index, size).unwrap();
            prop_assert_eq!(to_index(r, c, size).unwrap(), index);
        }

        #[test]
        fn radius_is_reflexive(size in 1usize..16, seed in any::<usize>(), r in 0usize..10) {
            let a = seed % (size * size);
            prop_assert!(within_radius(a, a, size, r));
        }

        #[test]
        fn radius_is_symmetric(size in 1usize..16, a in any::<usize>(), b in any::<usize>(), r in 0usize..10) {
            let (a, b) = (a % (size * size), b % (size * size));
            prop_assert_eq!(within_radius(a, b, size, r), within_radius(b, a, size, r));
        }

        #[test]
        fn radius_is_monotonic(size in 1usize..16, a in any::<usize>(), b in any::<usize>(), r in 0usize..10) {
            let (a, b) = (a % (size * size), b % (size * size));
            if within_radius(a, b, size, r) {
                prop_assert!(within_radius(a, b, size, r + 1));
            }
        }

        #[test]
        fn cells_within_agrees_with_radius(size in 1usize..12, seed in any::<usize>(), r in 0usize..6) {
            let center = seed % (size * size);
            let cells = cells_within(center, size, r);
            for cell in 0..size * size {
                prop_assert_eq!(cells.contains(&cell), within_radius(center, cell, size, r));
            }
        }
    }
}
