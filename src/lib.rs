//! Minesweeper SAT Mine Prover
//!
//! This library encodes the revealed clues of a minesweeper grid as CNF and
//! proves which unopened cells must hold a mine, using in-house search
//! strategies or the CaDiCaL SAT solver.

pub mod config;
pub mod error;
pub mod minesweeper;
pub mod sat;
pub mod solve;
pub mod utils;

pub use config::Settings;
pub use error::SolveError;
pub use minesweeper::{CellState, Grid};
pub use solve::{solve, solve_verified, MineFinder, SolveOptions, SolveReport, Verdict};

use anyhow::{Context, Result};

/// Load the configured grid and analyze it with the configured solver options
pub fn solve_with_settings(settings: &Settings) -> Result<SolveReport> {
    let grid = minesweeper::load_grid_from_file(&settings.input.grid_file)?;
    MineFinder::new(settings.solver.solve_options())
        .analyze(&grid)
        .with_context(|| format!("Failed to solve grid {}", settings.input.grid_file.display()))
}
