//! Mine proving over whole grids

pub mod orchestrator;
pub mod report;

pub use orchestrator::{solve, solve_verified, MineFinder, SolveOptions};
pub use report::{CellVerdict, SolveReport, Verdict};
