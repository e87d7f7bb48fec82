//! Rule-violation detection.
//!
//! A cell is *in conflict* when its digit duplicates another cell's digit
//! in the same row, column, or 3x3 box. The conflict map is a pure
//! function of the grid: it is recomputed wholesale on every change and
//! carries no memory of prior conflicts.

use crate::{Digit, DigitGrid, Position};

/// Per-cell conflict flags for a 9x9 grid.
///
/// `true` at a position means the digit there duplicates another digit in
/// its row, column, or box. The map records only a boolean per cell, not
/// which rule (or rules) triggered it.
///
/// # Examples
///
/// ```
/// use oradoku_core::{compute_conflicts, DigitGrid, Position};
///
/// let grid = DigitGrid::new();
/// let conflicts = compute_conflicts(&grid);
/// assert!(conflicts.is_clear());
/// assert!(!conflicts[Position::new(0, 0)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictMap {
    flags: [bool; 81],
}

impl Default for ConflictMap {
    fn default() -> Self {
        Self { flags: [false; 81] }
    }
}

impl ConflictMap {
    /// Returns true if no cell is marked.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        !self.flags.iter().any(|&flag| flag)
    }

    /// Returns an iterator over all marked positions, in row-major order.
    pub fn marked(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL
            .into_iter()
            .filter(|pos| self.flags[pos.index()])
    }
}

impl std::ops::Index<Position> for ConflictMap {
    type Output = bool;

    fn index(&self, pos: Position) -> &Self::Output {
        &self.flags[pos.index()]
    }
}

/// Computes the conflict map for a grid.
///
/// For each non-empty cell, its row, column, and box are each scanned for
/// another cell holding the same digit. The cell itself is excluded by
/// coordinate comparison, so a digit never matches against itself. Empty
/// cells are never marked, regardless of their surroundings.
///
/// Accepts any grid, including fully empty or fully contradictory ones,
/// and always produces a map. Cost is a constant 27 comparisons per cell;
/// at 81 cells there is nothing to gain from incremental updates.
#[must_use]
pub fn compute_conflicts(grid: &DigitGrid) -> ConflictMap {
    let mut map = ConflictMap::default();
    for pos in Position::ALL {
        if let Some(digit) = grid[pos]
            && has_duplicate_peer(grid, pos, digit)
        {
            map.flags[pos.index()] = true;
        }
    }
    map
}

/// Checks whether a grid is solved.
///
/// A grid is solved when every cell is filled and the conflict scan finds
/// no duplicates. The empty-cell check runs first and short-circuits, so
/// a consistent-but-incomplete grid is never reported as solved.
///
/// # Examples
///
/// ```
/// use oradoku_core::{is_solved, DigitGrid};
///
/// assert!(!is_solved(&DigitGrid::new()));
/// ```
#[must_use]
pub fn is_solved(grid: &DigitGrid) -> bool {
    for pos in Position::ALL {
        if grid[pos].is_none() {
            return false;
        }
    }
    Position::ALL.into_iter().all(|pos| {
        grid[pos].is_none_or(|digit| !has_duplicate_peer(grid, pos, digit))
    })
}

fn has_duplicate_peer(grid: &DigitGrid, pos: Position, digit: Digit) -> bool {
    // Row scan.
    for x in 0..9 {
        if x != pos.x() && grid[Position::new(x, pos.y())] == Some(digit) {
            return true;
        }
    }
    // Column scan.
    for y in 0..9 {
        if y != pos.y() && grid[Position::new(pos.x(), y)] == Some(digit) {
            return true;
        }
    }
    // Box scan. The cell itself is excluded by coordinates, not by value.
    let x0 = pos.x() / 3 * 3;
    let y0 = pos.y() / 3 * 3;
    for y in y0..y0 + 3 {
        for x in x0..x0 + 3 {
            if (x != pos.x() || y != pos.y()) && grid[Position::new(x, y)] == Some(digit) {
                return true;
            }
        }
    }
    false
}
