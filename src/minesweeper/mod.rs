//! Minesweeper grid model and text format

pub mod grid;
pub mod io;

pub use grid::{CellState, Grid};
pub use io::{create_example_grids, grid_to_string, load_grid_from_file, parse_grid_from_string, save_grid_to_file};
