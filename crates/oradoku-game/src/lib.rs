//! Game session management for Oradoku.
//!
//! A [`Game`] tracks the two grids of a puzzle in play: the *initial*
//! grid of given (read-only) cells fixed at puzzle start, and the
//! *current* grid of givens plus player input. Mutation is guarded so a
//! given cell can never be overwritten or cleared; conflict and
//! solved-state queries delegate to `oradoku-core`.

mod cell_state;
mod game;

pub use self::{
    cell_state::CellState,
    game::{Game, GameError},
};
