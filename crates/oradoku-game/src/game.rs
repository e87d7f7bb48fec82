use oradoku_core::{ConflictMap, Digit, DigitGrid, Position, compute_conflicts, is_solved};

use crate::CellState;

/// Errors returned by [`Game`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    /// A given (read-only) cell cannot be filled or cleared.
    #[display("cannot modify a given cell")]
    CannotModifyGivenCell,
    /// The current grid contradicts the initial grid's given cells.
    #[display("current grid is inconsistent with the initial grid")]
    InconsistentGrids,
}

/// A Sudoku game session.
///
/// Tracks given (initial, read-only) cells and player input, and answers
/// conflict and solved-state queries over the combined current grid.
///
/// # Example
///
/// ```
/// use oradoku_core::{Digit, DigitGrid, Position};
/// use oradoku_game::Game;
///
/// let mut puzzle = DigitGrid::new();
/// puzzle[Position::new(0, 0)] = Some(Digit::D5);
///
/// let mut game = Game::new(&puzzle);
/// assert!(game.cell(Position::new(0, 0)).is_given());
///
/// // Givens are read-only; empty cells accept input.
/// assert!(game.set_digit(Position::new(0, 0), Digit::D1).is_err());
/// assert!(game.set_digit(Position::new(1, 0), Digit::D3).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    cells: [CellState; 81],
}

impl Game {
    /// Creates a new session from a puzzle grid.
    ///
    /// Every digit in `puzzle` becomes a given cell; the rest start empty.
    #[must_use]
    pub fn new(puzzle: &DigitGrid) -> Self {
        let mut cells = [CellState::Empty; 81];
        for pos in Position::ALL {
            if let Some(digit) = puzzle[pos] {
                cells[pos.index()] = CellState::Given(digit);
            }
        }
        Self { cells }
    }

    /// Rebuilds a session from an initial grid and a current grid.
    ///
    /// Digits in `initial` become givens. Digits in `current` that are not
    /// givens are applied as player input; `current` is expected to
    /// contain every given unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InconsistentGrids`] if `current` is missing a
    /// given or holds a different digit where a given sits.
    pub fn from_grids(initial: &DigitGrid, current: &DigitGrid) -> Result<Self, GameError> {
        let mut game = Self::new(initial);
        for pos in Position::ALL {
            match (initial[pos], current[pos]) {
                (Some(given), current_cell) => {
                    if current_cell != Some(given) {
                        return Err(GameError::InconsistentGrids);
                    }
                }
                (None, Some(digit)) => {
                    game.cells[pos.index()] = CellState::Filled(digit);
                }
                (None, None) => {}
            }
        }
        Ok(game)
    }

    /// Returns the state of the cell at `pos`.
    #[must_use]
    pub fn cell(&self, pos: Position) -> CellState {
        self.cells[pos.index()]
    }

    /// Fills the cell at `pos` with `digit`, overwriting prior input.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotModifyGivenCell`] if the cell is a given.
    pub fn set_digit(&mut self, pos: Position, digit: Digit) -> Result<(), GameError> {
        if self.cells[pos.index()].is_given() {
            return Err(GameError::CannotModifyGivenCell);
        }
        self.cells[pos.index()] = CellState::Filled(digit);
        Ok(())
    }

    /// Clears player input at `pos`. Clearing an empty cell is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CannotModifyGivenCell`] if the cell is a given.
    pub fn clear_cell(&mut self, pos: Position) -> Result<(), GameError> {
        if self.cells[pos.index()].is_given() {
            return Err(GameError::CannotModifyGivenCell);
        }
        self.cells[pos.index()] = CellState::Empty;
        Ok(())
    }

    /// Returns the current grid: givens plus player input.
    #[must_use]
    pub fn digit_grid(&self) -> DigitGrid {
        let mut grid = DigitGrid::new();
        for pos in Position::ALL {
            grid[pos] = self.cells[pos.index()].as_digit();
        }
        grid
    }

    /// Returns the initial grid: given cells only.
    #[must_use]
    pub fn initial_grid(&self) -> DigitGrid {
        let mut grid = DigitGrid::new();
        for pos in Position::ALL {
            if let CellState::Given(digit) = self.cells[pos.index()] {
                grid[pos] = Some(digit);
            }
        }
        grid
    }

    /// Computes the conflict map for the current grid.
    #[must_use]
    pub fn conflicts(&self) -> ConflictMap {
        compute_conflicts(&self.digit_grid())
    }

    /// Checks if the game is solved.
    ///
    /// A game is solved when all cells are filled and there are no rule
    /// violations. Any valid completion counts, not just the one a solver
    /// would produce.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        is_solved(&self.digit_grid())
    }
}

#[cfg(test)]
mod tests {
    use oradoku_core::Digit;

    use super::*;

    const SOLVED: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    fn almost_solved_puzzle() -> DigitGrid {
        // The solved fixture with the last cell blanked out.
        let mut grid: DigitGrid = SOLVED.parse().unwrap();
        grid[Position::new(8, 8)] = None;
        grid
    }

    #[test]
    fn new_marks_puzzle_digits_as_givens() {
        let puzzle = almost_solved_puzzle();
        let game = Game::new(&puzzle);

        assert!(game.cell(Position::new(0, 0)).is_given());
        assert!(game.cell(Position::new(8, 8)).is_empty());
        assert_eq!(game.digit_grid(), puzzle);
        assert_eq!(game.initial_grid(), puzzle);
    }

    #[test]
    fn set_digit_rejects_givens_and_overwrites_fills() {
        let mut game = Game::new(&almost_solved_puzzle());
        let given = Position::new(0, 0);
        let open = Position::new(8, 8);

        assert_eq!(
            game.set_digit(given, Digit::D1),
            Err(GameError::CannotModifyGivenCell)
        );
        assert!(game.cell(given).is_given());

        game.set_digit(open, Digit::D1).unwrap();
        assert_eq!(game.cell(open), CellState::Filled(Digit::D1));
        game.set_digit(open, Digit::D9).unwrap();
        assert_eq!(game.cell(open), CellState::Filled(Digit::D9));
    }

    #[test]
    fn clear_cell_rejects_givens_and_clears_fills() {
        let mut game = Game::new(&almost_solved_puzzle());
        let given = Position::new(0, 0);
        let open = Position::new(8, 8);

        assert_eq!(
            game.clear_cell(given),
            Err(GameError::CannotModifyGivenCell)
        );

        // Clearing an already-empty cell succeeds.
        game.clear_cell(open).unwrap();
        assert!(game.cell(open).is_empty());

        game.set_digit(open, Digit::D3).unwrap();
        game.clear_cell(open).unwrap();
        assert!(game.cell(open).is_empty());
    }

    #[test]
    fn filling_the_last_cell_solves_the_game() {
        let mut game = Game::new(&almost_solved_puzzle());
        assert!(!game.is_solved());

        game.set_digit(Position::new(8, 8), Digit::D9).unwrap();
        assert!(game.is_solved());
        assert!(game.conflicts().is_clear());

        // A wrong digit completes the grid but does not solve it.
        game.set_digit(Position::new(8, 8), Digit::D1).unwrap();
        assert!(!game.is_solved());
        assert!(!game.conflicts().is_clear());
    }

    #[test]
    fn from_grids_rebuilds_fills_and_rejects_mismatches() {
        let initial = almost_solved_puzzle();
        let mut current = initial.clone();
        current[Position::new(8, 8)] = Some(Digit::D9);

        let game = Game::from_grids(&initial, &current).unwrap();
        assert_eq!(
            game.cell(Position::new(8, 8)),
            CellState::Filled(Digit::D9)
        );
        assert!(game.cell(Position::new(0, 0)).is_given());
        assert!(game.is_solved());

        // A current grid that drops or rewrites a given is rejected.
        let mut missing = current.clone();
        missing[Position::new(0, 0)] = None;
        assert_eq!(
            Game::from_grids(&initial, &missing),
            Err(GameError::InconsistentGrids)
        );

        let mut rewritten = current;
        rewritten[Position::new(0, 0)] = Some(Digit::D1);
        assert_eq!(
            Game::from_grids(&initial, &rewritten),
            Err(GameError::InconsistentGrids)
        );
    }
}
