use oradoku_core::Digit;

/// The state of a single cell in a game session.
///
/// Given cells come from the puzzle (generated, extracted from a photo,
/// or rebuilt from an initial grid) and are read-only for the rest of the
/// session. Filled cells hold player input, hint applications, and solve
/// results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum CellState {
    /// A read-only digit fixed at puzzle start.
    Given(Digit),
    /// A digit entered during play.
    Filled(Digit),
    /// No digit.
    Empty,
}

impl CellState {
    /// Returns the digit if the cell holds one, given or filled.
    #[must_use]
    pub const fn as_digit(&self) -> Option<Digit> {
        match self {
            Self::Given(digit) | Self::Filled(digit) => Some(*digit),
            Self::Empty => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_digit_and_variant_queries() {
        assert_eq!(CellState::Given(Digit::D4).as_digit(), Some(Digit::D4));
        assert_eq!(CellState::Filled(Digit::D8).as_digit(), Some(Digit::D8));
        assert_eq!(CellState::Empty.as_digit(), None);

        assert!(CellState::Given(Digit::D1).is_given());
        assert!(CellState::Filled(Digit::D1).is_filled());
        assert!(CellState::Empty.is_empty());
    }
}
