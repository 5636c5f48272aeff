//! Per-cell mine proving over a constraint system

use super::report::{CellVerdict, SolveReport, Verdict};
use crate::config::Strategy;
use crate::error::SolveError;
use crate::minesweeper::{CellState, Grid};
use crate::sat::{
    ConstraintEncoder, ConstraintSystem, Deadline, Pin, SearchOutcome, SearchStrategy, Successor,
    UnifiedSolver,
};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Options controlling one `MineFinder`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOptions {
    pub strategy: Strategy,
    pub successor: Successor,
    /// Deadline for every individual search, `None` for no limit
    pub timeout: Option<Duration>,
    /// Check the whole grid for consistency before proving cells
    pub verify_feasible: bool,
    /// Also pin each cell as a mine to prove it safe
    pub prove_safe: bool,
    pub parallel: bool,
    /// Size of a dedicated thread pool; `None` uses rayon's global pool
    pub threads: Option<usize>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            successor: Successor::default(),
            timeout: None,
            verify_feasible: false,
            prove_safe: false,
            parallel: true,
            threads: None,
        }
    }
}

/// Outcome of the queries made for one variable
#[derive(Debug, Clone, Copy)]
struct CellQuery {
    verdict: Verdict,
    nodes: u64,
}

/// Proves which unopened cells must hold a mine
#[derive(Debug, Clone, Default)]
pub struct MineFinder {
    options: SolveOptions,
}

impl MineFinder {
    pub fn new(options: SolveOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SolveOptions {
        &self.options
    }

    /// Encode `grid`, query every variable and flag the proven mines
    pub fn analyze(&self, grid: &Grid) -> Result<SolveReport, SolveError> {
        let start_time = Instant::now();

        let mut encoder = ConstraintEncoder::for_grid(grid);
        let system = encoder.encode(grid);
        let statistics = encoder.statistics().clone();

        if system.has_empty_clause() {
            warn!("Grid has {} infeasible clue(s)", statistics.infeasible_cells.len());
            return Err(SolveError::UnsatisfiableGrid);
        }

        let mut warnings = Vec::new();
        let mut nodes_explored = 0;

        if self.options.verify_feasible {
            let mut solver = self.solver_for(&system);
            let result = solver.search(&system, None, &self.deadline());
            nodes_explored += result.nodes_explored;
            match result.outcome {
                SearchOutcome::Satisfiable => info!("Grid is consistent"),
                SearchOutcome::Unsatisfiable => {
                    warn!("Grid clues admit no mine placement");
                    return Err(SolveError::UnsatisfiableGrid);
                }
                SearchOutcome::TimedOut => {
                    let warning = SolveError::SearchTimeout { variable: None };
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        let queries = self.query_all(&system);

        let mut solved = grid.clone();
        let mut verdicts = Vec::with_capacity(queries.len());
        for (index, query) in queries.into_iter().enumerate() {
            let variable = system.variables().variable_at(index);
            let (row, column) = grid
                .position(variable)
                .ok_or_else(|| SolveError::MalformedGrid(format!("variable {} lies outside the grid", variable)))?;

            nodes_explored += query.nodes;
            match query.verdict {
                Verdict::Mine => solved.set(row, column, CellState::Flagged)?,
                Verdict::TimedOut => {
                    let warning = SolveError::SearchTimeout {
                        variable: Some(variable),
                    };
                    warn!("{}", warning);
                    warnings.push(warning);
                }
                Verdict::Safe | Verdict::Unknown => {}
            }

            verdicts.push(CellVerdict {
                row,
                column,
                variable,
                verdict: query.verdict,
            });
        }

        let report = SolveReport {
            grid: solved,
            verdicts,
            warnings,
            statistics,
            strategy: self.options.strategy,
            nodes_explored,
            elapsed: start_time.elapsed(),
        };

        info!(
            "Proved {} mine(s) and {} safe cell(s) among {} candidates using {} in {:.3}s",
            report.count(Verdict::Mine),
            report.count(Verdict::Safe),
            report.verdicts.len(),
            self.options.strategy,
            report.elapsed.as_secs_f64()
        );

        Ok(report)
    }

    fn deadline(&self) -> Deadline {
        Deadline::from_timeout(self.options.timeout)
    }

    fn solver_for(&self, system: &ConstraintSystem) -> UnifiedSolver {
        UnifiedSolver::new(self.options.strategy, self.options.successor, system)
    }

    /// Query every variable; results are in variable order regardless of scheduling
    fn query_all(&self, system: &ConstraintSystem) -> Vec<CellQuery> {
        let count = system.variable_count();

        if !self.options.parallel {
            let mut solver = self.solver_for(system);
            return (0..count).map(|index| self.query(&mut solver, system, index)).collect();
        }

        let run = || -> Vec<CellQuery> {
            (0..count)
                .into_par_iter()
                .map_init(|| self.solver_for(system), |solver, index| self.query(solver, system, index))
                .collect()
        };

        match self.options.threads {
            Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => pool.install(run),
                Err(e) => {
                    warn!("Failed to build a {}-thread pool, using the global pool: {}", threads, e);
                    run()
                }
            },
            None => run(),
        }
    }

    /// Pin `index` safe and, when asked, as a mine
    fn query(&self, solver: &mut UnifiedSolver, system: &ConstraintSystem, index: usize) -> CellQuery {
        let as_safe = solver.search(system, Some(Pin::safe(index)), &self.deadline());
        let mut nodes = as_safe.nodes_explored;

        let verdict = match as_safe.outcome {
            SearchOutcome::Unsatisfiable => Verdict::Mine,
            SearchOutcome::TimedOut => Verdict::TimedOut,
            SearchOutcome::Satisfiable if self.options.prove_safe => {
                let as_mine = solver.search(system, Some(Pin::mine(index)), &self.deadline());
                nodes += as_mine.nodes_explored;
                match as_mine.outcome {
                    SearchOutcome::Unsatisfiable => Verdict::Safe,
                    SearchOutcome::TimedOut => Verdict::TimedOut,
                    SearchOutcome::Satisfiable => Verdict::Unknown,
                }
            }
            SearchOutcome::Satisfiable => Verdict::Unknown,
        };

        debug!(
            "Variable {} is {} after {} node(s)",
            system.variables().variable_at(index),
            verdict,
            nodes
        );
        CellQuery { verdict, nodes }
    }
}

/// Flag every provably mined cell of `grid`
pub fn solve(grid: &Grid) -> Result<Grid, SolveError> {
    solve_verified(grid, false)
}

/// Like `solve`, optionally rejecting inconsistent grids up front
pub fn solve_verified(grid: &Grid, verify_feasible: bool) -> Result<Grid, SolveError> {
    let options = SolveOptions {
        verify_feasible,
        ..SolveOptions::default()
    };
    MineFinder::new(options).analyze(grid).map(|report| report.grid)
}
