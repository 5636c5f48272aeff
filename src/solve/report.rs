//! Per-cell verdicts and the solve report

use crate::config::Strategy;
use crate::error::SolveError;
use crate::minesweeper::Grid;
use crate::sat::ConstraintStatistics;
use serde::{Serialize, Serializer};
use std::time::Duration;

/// What the prover established about one unopened cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// No model has the cell safe
    Mine,
    /// No model has the cell as a mine; only decided with safe-cell proving on
    Safe,
    Unknown,
    TimedOut,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Mine => write!(f, "mine"),
            Verdict::Safe => write!(f, "safe"),
            Verdict::Unknown => write!(f, "unknown"),
            Verdict::TimedOut => write!(f, "timed out"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellVerdict {
    pub row: usize,
    pub column: usize,
    pub variable: i32,
    pub verdict: Verdict,
}

/// Everything one `MineFinder::analyze` call produced
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    /// Input grid with every proven mine flagged
    pub grid: Grid,
    /// One entry per variable, in variable order
    pub verdicts: Vec<CellVerdict>,
    /// Non-fatal problems such as search timeouts
    #[serde(serialize_with = "serialize_warnings")]
    pub warnings: Vec<SolveError>,
    pub statistics: ConstraintStatistics,
    pub strategy: Strategy,
    pub nodes_explored: u64,
    pub elapsed: Duration,
}

fn serialize_warnings<S: Serializer>(warnings: &[SolveError], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(warnings.iter().map(|warning| warning.to_string()))
}

impl SolveReport {
    fn cells_with(&self, verdict: Verdict) -> Vec<(usize, usize)> {
        self.verdicts
            .iter()
            .filter(|cell| cell.verdict == verdict)
            .map(|cell| (cell.row, cell.column))
            .collect()
    }

    pub fn mines(&self) -> Vec<(usize, usize)> {
        self.cells_with(Verdict::Mine)
    }

    pub fn safe_cells(&self) -> Vec<(usize, usize)> {
        self.cells_with(Verdict::Safe)
    }

    pub fn count(&self, verdict: Verdict) -> usize {
        self.verdicts.iter().filter(|cell| cell.verdict == verdict).count()
    }

    /// Whether every query reached a conclusion
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Serialize the report as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
