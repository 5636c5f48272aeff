//! Constraint generation for minesweeper SAT encoding

use super::knowledge_base::ConstraintSystem;
use crate::minesweeper::{CellState, Grid};
use itertools::Itertools;
use log::{debug, warn};
use std::collections::BTreeSet;

/// Represents a SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<i32>, // Positive for "is a mine", negative for "is safe"
}

/// Status of one clause under a partial assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseStatus {
    Satisfied,
    Violated,
    Undetermined,
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Create a unit clause (single literal)
    pub fn unit(literal: i32) -> Self {
        Self { literals: vec![literal] }
    }

    /// Create a binary clause (two literals)
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self { literals: vec![lit1, lit2] }
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Check if clause is unit
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// Variables referenced by the clause
    pub fn variables(&self) -> impl Iterator<Item = i32> + '_ {
        self.literals.iter().map(|lit| lit.abs())
    }

    /// Evaluate the clause given a lookup from variable to its value
    pub fn status<F>(&self, value_of: F) -> ClauseStatus
    where
        F: Fn(i32) -> Option<bool>,
    {
        let mut has_unassigned = false;
        for &literal in &self.literals {
            match value_of(literal.abs()) {
                Some(value) if value == (literal > 0) => return ClauseStatus::Satisfied,
                Some(_) => {}
                None => has_unassigned = true,
            }
        }

        if has_unassigned {
            ClauseStatus::Undetermined
        } else {
            ClauseStatus::Violated
        }
    }
}

/// Translates a grid snapshot into a constraint system
pub struct ConstraintEncoder {
    width: usize,
    height: usize,
    statistics: ConstraintStatistics,
}

impl ConstraintEncoder {
    /// Create a new encoder for grids of the given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            statistics: ConstraintStatistics {
                width,
                height,
                ..ConstraintStatistics::default()
            },
        }
    }

    /// Encoder sized for `grid`
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.width, grid.height)
    }

    /// Generate all clauses for the grid
    pub fn encode(&mut self, grid: &Grid) -> ConstraintSystem {
        debug_assert_eq!((grid.width, grid.height), (self.width, self.height));

        let mut clauses = Vec::new();
        let mut variables = BTreeSet::new();
        let mut statistics = ConstraintStatistics {
            width: self.width,
            height: self.height,
            ..ConstraintStatistics::default()
        };

        for row in 0..self.height {
            for col in 0..self.width {
                let count = match grid.cells[grid.index(row, col)] {
                    CellState::Revealed(count) if count > 0 => count,
                    _ => continue,
                };

                let cell = self.generate_cell_constraints(grid, row, col, count);
                statistics.cells_encoded += 1;
                if cell.infeasible {
                    warn!(
                        "Clue {} at ({}, {}) cannot be met by its neighbors",
                        count, row, col
                    );
                    statistics.infeasible_cells.push((row, col));
                }

                variables.extend(cell.neighbors);
                clauses.extend(cell.clauses);
            }
        }

        statistics.total_clauses = clauses.len();
        statistics.total_variables = variables.len();
        debug!(
            "Encoded {} clues into {} clauses over {} variables",
            statistics.cells_encoded, statistics.total_clauses, statistics.total_variables
        );

        self.statistics = statistics;
        ConstraintSystem::new(clauses, variables)
    }

    /// Generate the at-most and at-least clauses for one revealed cell
    fn generate_cell_constraints(&self, grid: &Grid, row: usize, col: usize, count: u8) -> CellConstraints {
        let mut remaining = i32::from(count);
        let mut neighbors = Vec::new();

        for (r, c) in grid.neighbors(row, col) {
            match grid.cells[grid.index(r, c)] {
                CellState::Flagged => remaining -= 1,
                CellState::Unopened => neighbors.push(grid.variable(r, c)),
                CellState::Revealed(_) => {}
            }
        }

        // More flags than the clue, or more mines than room: no model exists
        if remaining < 0 || remaining as usize > neighbors.len() {
            return CellConstraints {
                neighbors,
                clauses: vec![Clause::new(Vec::new())],
                infeasible: true,
            };
        }

        let remaining = remaining as usize;
        let mut clauses = Self::at_most(&neighbors, remaining);
        clauses.extend(Self::at_least(&neighbors, remaining));

        CellConstraints {
            neighbors,
            clauses,
            infeasible: false,
        }
    }

    /// No (k+1) of the neighbors are mines together
    fn at_most(neighbors: &[i32], k: usize) -> Vec<Clause> {
        neighbors
            .iter()
            .combinations(k + 1)
            .map(|subset| Clause::new(subset.into_iter().map(|&var| -var).collect()))
            .collect()
    }

    /// No (n-k+1) of the neighbors are safe together
    fn at_least(neighbors: &[i32], k: usize) -> Vec<Clause> {
        if k == 0 {
            return Vec::new();
        }
        neighbors
            .iter()
            .combinations(neighbors.len() - k + 1)
            .map(|subset| Clause::new(subset.into_iter().copied().collect()))
            .collect()
    }

    /// Get constraint generation statistics of the last encoding
    pub fn statistics(&self) -> &ConstraintStatistics {
        &self.statistics
    }
}

struct CellConstraints {
    neighbors: Vec<i32>,
    clauses: Vec<Clause>,
    infeasible: bool,
}

/// Statistics about constraint generation
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ConstraintStatistics {
    pub width: usize,
    pub height: usize,
    pub cells_encoded: usize,
    pub total_clauses: usize,
    pub total_variables: usize,
    pub infeasible_cells: Vec<(usize, usize)>,
}

impl ConstraintStatistics {
    /// Rough size class of the search space
    pub fn complexity(&self) -> ComplexityLevel {
        match self.total_variables {
            0..=20 => ComplexityLevel::Low,
            21..=60 => ComplexityLevel::Medium,
            61..=200 => ComplexityLevel::High,
            _ => ComplexityLevel::VeryHigh,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl std::fmt::Display for ConstraintStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Constraint Generation Statistics:")?;
        writeln!(f, "  Grid size: {}x{}", self.width, self.height)?;
        writeln!(f, "  Clues encoded: {}", self.cells_encoded)?;
        writeln!(f, "  Total clauses: {}", self.total_clauses)?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        if !self.infeasible_cells.is_empty() {
            writeln!(f, "  Infeasible clues: {:?}", self.infeasible_cells)?;
        }

        let recommendation = match self.complexity() {
            ComplexityLevel::Low => "Any strategy works, including exhaustive enumeration",
            ComplexityLevel::Medium => "Use backtracking or best-first search",
            ComplexityLevel::High => "Prefer backtracking with a timeout, or cadical",
            ComplexityLevel::VeryHigh => "Use cadical; in-house searches will likely time out",
        };
        writeln!(f, "  Complexity: {:?} ({})", self.complexity(), recommendation)?;
        Ok(())
    }
}
