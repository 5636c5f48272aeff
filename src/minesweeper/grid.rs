//! Grid representation for partially revealed minesweeper boards

use crate::error::SolveError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Visible state of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    /// Opened cell showing the number of adjacent mines
    Revealed(u8),
    Unopened,
    /// Cell marked as a mine
    Flagged,
}

impl CellState {
    pub fn is_unopened(&self) -> bool {
        matches!(self, CellState::Unopened)
    }

    pub fn is_flagged(&self) -> bool {
        matches!(self, CellState::Flagged)
    }
}

/// Represents a minesweeper grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<CellState>,
}

impl Grid {
    /// Create a grid where every cell is unopened
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![CellState::Unopened; width * height],
        }
    }

    /// Create a grid from rows of cell states
    pub fn from_cells(cells: Vec<Vec<CellState>>) -> Result<Self, SolveError> {
        if cells.is_empty() {
            return Err(SolveError::MalformedGrid("grid cannot be empty".to_string()));
        }

        let height = cells.len();
        let width = cells[0].len();

        if width == 0 {
            return Err(SolveError::MalformedGrid("grid width cannot be zero".to_string()));
        }

        for (i, row) in cells.iter().enumerate() {
            if row.len() != width {
                return Err(SolveError::MalformedGrid(format!(
                    "row {} has length {}, expected {}",
                    i,
                    row.len(),
                    width
                )));
            }
        }

        Ok(Self {
            width,
            height,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Get the cell state at coordinates, `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        if row < self.height && col < self.width {
            Some(self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// Set the cell state at coordinates
    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<(), SolveError> {
        if row >= self.height || col >= self.width {
            return Err(SolveError::MalformedGrid(format!(
                "coordinates ({}, {}) out of bounds for {}x{} grid",
                row, col, self.height, self.width
            )));
        }
        let idx = self.index(row, col);
        self.cells[idx] = state;
        Ok(())
    }

    /// In-bounds neighbors of a cell in row-major order
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let rows = row.saturating_sub(1)..=(row + 1).min(self.height - 1);
        rows.flat_map(move |r| {
            let cols = col.saturating_sub(1)..=(col + 1).min(self.width - 1);
            cols.map(move |c| (r, c))
        })
        .filter(move |&(r, c)| r != row || c != col)
    }

    /// SAT variable for the cell at coordinates (row-major, 1-based)
    #[inline]
    pub fn variable(&self, row: usize, col: usize) -> i32 {
        (self.index(row, col) + 1) as i32
    }

    /// Coordinates of the cell a SAT variable refers to
    pub fn position(&self, variable: i32) -> Option<(usize, usize)> {
        if variable < 1 {
            return None;
        }
        let idx = (variable - 1) as usize;
        if idx < self.cells.len() {
            Some((idx / self.width, idx % self.width))
        } else {
            None
        }
    }

    /// Coordinates of all unopened cells
    pub fn unopened_cells(&self) -> Vec<(usize, usize)> {
        self.positions_where(CellState::is_unopened)
    }

    /// Coordinates of all flagged cells
    pub fn flagged_cells(&self) -> Vec<(usize, usize)> {
        self.positions_where(CellState::is_flagged)
    }

    fn positions_where(&self, predicate: impl Fn(&CellState) -> bool) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| predicate(*cell))
            .map(|(idx, _)| (idx / self.width, idx % self.width))
            .collect()
    }

    pub fn unopened_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_unopened()).count()
    }

    pub fn flagged_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_flagged()).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let symbol = match self.cells[self.index(row, col)] {
                    CellState::Unopened => '■',
                    CellState::Flagged => '⚐',
                    CellState::Revealed(0) => ' ',
                    CellState::Revealed(n) => char::from(b'0' + n.min(9)),
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
