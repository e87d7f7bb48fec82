//! Wire-format conversion for oracle payloads.
//!
//! The oracle speaks 9x9 arrays of integers 0-9 where 0 denotes an empty
//! cell. The application model uses `Option<Digit>` and never stores a
//! zero, so every call converts here, in both directions.

use oradoku_core::{Digit, DigitGrid, Position};

use crate::{Hint, OracleError};

/// Encodes a grid in the wire format: 9 rows of 9 integers, 0 for empty.
///
/// # Examples
///
/// ```
/// use oradoku_core::{Digit, DigitGrid, Position};
/// use oradoku_oracle::wire;
///
/// let mut grid = DigitGrid::new();
/// grid[Position::new(3, 0)] = Some(Digit::D7);
///
/// let rows = wire::grid_to_wire(&grid);
/// assert_eq!(rows[0], [0, 0, 0, 7, 0, 0, 0, 0, 0]);
/// ```
#[must_use]
pub fn grid_to_wire(grid: &DigitGrid) -> [[u8; 9]; 9] {
    let mut rows = [[0u8; 9]; 9];
    for pos in Position::ALL {
        if let Some(digit) = grid[pos] {
            rows[pos.y() as usize][pos.x() as usize] = digit.value();
        }
    }
    rows
}

/// Decodes a wire grid into the application model.
///
/// The input must be exactly 9 rows of 9 values in 0-9; 0 becomes an
/// empty cell.
///
/// # Errors
///
/// Returns [`OracleError::SchemaViolation`] for a ragged shape or an
/// out-of-range value.
pub fn grid_from_wire(rows: &[Vec<i64>]) -> Result<DigitGrid, OracleError> {
    decode_rows(rows, true)
}

/// Decodes a wire grid that must be fully filled (a solve response).
///
/// # Errors
///
/// Returns [`OracleError::SchemaViolation`] for a ragged shape, an
/// out-of-range value, or any 0 — a solve response has no empties.
pub fn solution_from_wire(rows: &[Vec<i64>]) -> Result<DigitGrid, OracleError> {
    decode_rows(rows, false)
}

fn decode_rows(rows: &[Vec<i64>], allow_empty: bool) -> Result<DigitGrid, OracleError> {
    if rows.len() != 9 || rows.iter().any(|row| row.len() != 9) {
        return Err(OracleError::SchemaViolation);
    }
    let mut grid = DigitGrid::new();
    for (y, row) in (0u8..).zip(rows) {
        for (x, &value) in (0u8..).zip(row) {
            let cell = if value == 0 && allow_empty {
                None
            } else {
                let digit = u8::try_from(value)
                    .ok()
                    .and_then(Digit::try_from_value)
                    .ok_or(OracleError::SchemaViolation)?;
                Some(digit)
            };
            grid[Position::new(x, y)] = cell;
        }
    }
    Ok(grid)
}

/// The hint payload as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct HintWire {
    /// Row index, expected in 0-8.
    pub row: i64,
    /// Column index, expected in 0-8.
    pub col: i64,
    /// Digit value, expected in 1-9.
    pub value: i64,
    /// Free-text justification.
    pub explanation: String,
}

/// Validates a wire hint and converts it to the application model.
///
/// # Errors
///
/// Returns [`OracleError::SchemaViolation`] when the row or column is
/// outside 0-8 or the value outside 1-9.
pub fn hint_from_wire(hint: HintWire) -> Result<Hint, OracleError> {
    let (Ok(row), Ok(col)) = (u8::try_from(hint.row), u8::try_from(hint.col)) else {
        return Err(OracleError::SchemaViolation);
    };
    if row > 8 || col > 8 {
        return Err(OracleError::SchemaViolation);
    }
    let digit = u8::try_from(hint.value)
        .ok()
        .and_then(Digit::try_from_value)
        .ok_or(OracleError::SchemaViolation)?;
    Ok(Hint {
        position: Position::new(col, row),
        digit,
        explanation: hint.explanation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_rows(grid: &DigitGrid) -> Vec<Vec<i64>> {
        grid_to_wire(grid)
            .iter()
            .map(|row| row.iter().map(|&v| i64::from(v)).collect())
            .collect()
    }

    #[test]
    fn grid_round_trips_through_the_wire() {
        let grid: DigitGrid =
            "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79"
                .parse()
                .unwrap();
        let decoded = grid_from_wire(&wire_rows(&grid)).unwrap();
        assert_eq!(decoded, grid);
    }

    #[test]
    fn zero_decodes_to_empty() {
        let mut rows = vec![vec![0i64; 9]; 9];
        rows[2][5] = 4;
        let grid = grid_from_wire(&rows).unwrap();
        assert_eq!(grid[Position::new(5, 2)], Some(Digit::D4));
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    fn ragged_and_out_of_range_grids_are_rejected() {
        assert_eq!(
            grid_from_wire(&vec![vec![0i64; 9]; 8]),
            Err(OracleError::SchemaViolation)
        );

        let mut short_row = vec![vec![0i64; 9]; 9];
        short_row[4] = vec![0; 8];
        assert_eq!(grid_from_wire(&short_row), Err(OracleError::SchemaViolation));

        let mut too_big = vec![vec![0i64; 9]; 9];
        too_big[0][0] = 10;
        assert_eq!(grid_from_wire(&too_big), Err(OracleError::SchemaViolation));

        let mut negative = vec![vec![0i64; 9]; 9];
        negative[0][0] = -1;
        assert_eq!(grid_from_wire(&negative), Err(OracleError::SchemaViolation));
    }

    #[test]
    fn solutions_must_be_complete() {
        let solved: DigitGrid =
            "534678912672195348198342567859761423426853791713924856961537284287419635345286179"
                .parse()
                .unwrap();
        let rows = wire_rows(&solved);
        assert_eq!(solution_from_wire(&rows).unwrap(), solved);

        let mut with_hole = rows;
        with_hole[8][8] = 0;
        assert_eq!(
            solution_from_wire(&with_hole),
            Err(OracleError::SchemaViolation)
        );
    }

    #[test]
    fn hints_are_validated() {
        let hint = hint_from_wire(HintWire {
            row: 2,
            col: 7,
            value: 9,
            explanation: "Only 9 fits here.".to_string(),
        })
        .unwrap();
        assert_eq!(hint.position, Position::new(7, 2));
        assert_eq!(hint.digit, Digit::D9);

        for (row, col, value) in [(9, 0, 1), (0, 9, 1), (0, 0, 0), (0, 0, 10), (-1, 0, 1)] {
            let result = hint_from_wire(HintWire {
                row,
                col,
                value,
                explanation: String::new(),
            });
            assert_eq!(result, Err(OracleError::SchemaViolation));
        }
    }
}
