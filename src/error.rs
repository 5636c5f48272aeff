//! Error types surfaced by the grid loader and the mine prover

use thiserror::Error;

/// Errors produced while loading or solving a minesweeper grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// A token that is neither a digit 0-8 nor the unopened/flagged marker
    #[error("invalid symbol '{symbol}' at row {row}, column {column}")]
    InvalidInputSymbol {
        symbol: String,
        row: usize,
        column: usize,
    },

    /// Empty grid or rows of different lengths
    #[error("malformed grid: {0}")]
    MalformedGrid(String),

    /// The clues of the grid contradict each other
    #[error("unsatisfiable grid: the clues are mutually contradictory")]
    UnsatisfiableGrid,

    /// A search ran past its deadline; `variable` is `None` for the whole-grid check
    #[error("search timed out {}", timeout_target(.variable))]
    SearchTimeout { variable: Option<i32> },
}

fn timeout_target(variable: &Option<i32>) -> String {
    match variable {
        Some(var) => format!("for variable {}", var),
        None => "during the feasibility check".to_string(),
    }
}

impl SolveError {
    /// Whether the solve as a whole has to stop on this error
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SolveError::SearchTimeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SolveError::InvalidInputSymbol {
            symbol: "?".to_string(),
            row: 2,
            column: 1,
        };
        assert_eq!(err.to_string(), "invalid symbol '?' at row 2, column 1");

        let timeout = SolveError::SearchTimeout { variable: Some(7) };
        assert_eq!(timeout.to_string(), "search timed out for variable 7");

        let check = SolveError::SearchTimeout { variable: None };
        assert_eq!(check.to_string(), "search timed out during the feasibility check");
    }

    #[test]
    fn test_fatality() {
        assert!(SolveError::UnsatisfiableGrid.is_fatal());
        assert!(!SolveError::SearchTimeout { variable: None }.is_fatal());
    }
}
