//! Factory for creating search strategy instances based on configuration

use super::backtracking::BacktrackingSolver;
use super::best_first::{HeuristicSearchSolver, Successor};
use super::brute_force::ExhaustiveEnumerationSolver;
use super::cadical_solver::CadicalSolver;
use super::knowledge_base::ConstraintSystem;
use super::solver::{Deadline, Pin, SearchResult, SearchStrategy};
use crate::config::Strategy;

/// Unified search interface over every available strategy
#[derive(Debug)]
pub enum UnifiedSolver {
    Exhaustive(ExhaustiveEnumerationSolver),
    Backtracking(BacktrackingSolver),
    BestFirst(HeuristicSearchSolver),
    Cadical(CadicalSolver),
}

impl UnifiedSolver {
    /// Create a solver for `system`; only CaDiCaL loads the clauses up front
    pub fn new(strategy: Strategy, successor: Successor, system: &ConstraintSystem) -> Self {
        match strategy {
            Strategy::Exhaustive => UnifiedSolver::Exhaustive(ExhaustiveEnumerationSolver::new()),
            Strategy::Backtracking => UnifiedSolver::Backtracking(BacktrackingSolver::new()),
            Strategy::BestFirst => UnifiedSolver::BestFirst(HeuristicSearchSolver::new(successor)),
            Strategy::Cadical => UnifiedSolver::Cadical(CadicalSolver::new(system)),
        }
    }

    /// Get the strategy being used
    pub fn strategy(&self) -> Strategy {
        match self {
            UnifiedSolver::Exhaustive(_) => Strategy::Exhaustive,
            UnifiedSolver::Backtracking(_) => Strategy::Backtracking,
            UnifiedSolver::BestFirst(_) => Strategy::BestFirst,
            UnifiedSolver::Cadical(_) => Strategy::Cadical,
        }
    }
}

impl SearchStrategy for UnifiedSolver {
    fn name(&self) -> &'static str {
        match self {
            UnifiedSolver::Exhaustive(solver) => solver.name(),
            UnifiedSolver::Backtracking(solver) => solver.name(),
            UnifiedSolver::BestFirst(solver) => solver.name(),
            UnifiedSolver::Cadical(solver) => solver.name(),
        }
    }

    fn search(&mut self, system: &ConstraintSystem, pin: Option<Pin>, deadline: &Deadline) -> SearchResult {
        match self {
            UnifiedSolver::Exhaustive(solver) => solver.search(system, pin, deadline),
            UnifiedSolver::Backtracking(solver) => solver.search(system, pin, deadline),
            UnifiedSolver::BestFirst(solver) => solver.search(system, pin, deadline),
            UnifiedSolver::Cadical(solver) => solver.search(system, pin, deadline),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minesweeper::parse_grid_from_string;
    use crate::sat::constraints::ConstraintEncoder;
    use crate::sat::solver::SearchOutcome;

    const STRATEGIES: [Strategy; 4] = [
        Strategy::Exhaustive,
        Strategy::Backtracking,
        Strategy::BestFirst,
        Strategy::Cadical,
    ];

    #[test]
    fn test_solver_creation() {
        let system = ConstraintSystem::default();
        for strategy in STRATEGIES {
            let solver = UnifiedSolver::new(strategy, Successor::Extend, &system);
            assert_eq!(solver.strategy(), strategy);
        }
        let solver = UnifiedSolver::new(Strategy::BestFirst, Successor::Flip, &system);
        assert_eq!(solver.name(), "best_first(flip)");
    }

    #[test]
    fn test_strategies_agree_on_every_pin() {
        let grid = parse_grid_from_string("_, _, _, _\n1, 2, 2, 1\n0, 0, 0, 0\n").unwrap();
        let system = ConstraintEncoder::for_grid(&grid).encode(&grid);

        for index in 0..system.variable_count() {
            for pin in [Pin::safe(index), Pin::mine(index)] {
                let mut outcomes = Vec::new();
                for strategy in STRATEGIES {
                    for successor in [Successor::Extend, Successor::Flip] {
                        let mut solver = UnifiedSolver::new(strategy, successor, &system);
                        outcomes.push(solver.search(&system, Some(pin), &Deadline::none()).outcome);
                    }
                }
                assert!(
                    outcomes.iter().all(|&o| o == outcomes[0]),
                    "disagreement for {:?}: {:?}",
                    pin,
                    outcomes
                );
                assert_ne!(outcomes[0], SearchOutcome::TimedOut);
            }
        }
    }
}
