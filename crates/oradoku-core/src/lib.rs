//! Core data structures and rule logic for Oradoku.
//!
//! This crate holds the deterministic heart of the application: typed
//! digits and positions, the 9x9 grid, and real-time rule-violation
//! detection. Everything here is pure and synchronous; puzzle generation,
//! solving, and hints live behind the oracle boundary in a separate crate.
//!
//! # Overview
//!
//! - [`digit`]: Type-safe representation of sudoku digits 1-9
//! - [`position`]: Board position (x, y) coordinates and box indexing
//! - [`digit_grid`]: The 9x9 grid of optionally-filled cells
//! - [`conflict`]: The conflict map and the solved-state check
//!
//! # Examples
//!
//! ```
//! use oradoku_core::{compute_conflicts, Digit, DigitGrid, Position};
//!
//! let mut grid = DigitGrid::new();
//! grid[Position::new(0, 0)] = Some(Digit::D5);
//! grid[Position::new(3, 0)] = Some(Digit::D5);
//!
//! let conflicts = compute_conflicts(&grid);
//! assert!(conflicts[Position::new(0, 0)]);
//! assert!(conflicts[Position::new(3, 0)]);
//! assert!(!conflicts[Position::new(1, 0)]);
//! ```

pub mod conflict;
pub mod digit;
pub mod digit_grid;
pub mod position;

// Re-export commonly used types
pub use self::{
    conflict::{ConflictMap, compute_conflicts, is_solved},
    digit::Digit,
    digit_grid::{DigitGrid, ParseDigitGridError},
    position::Position,
};
