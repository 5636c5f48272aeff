//! CaDiCaL adapter answering queries under temporary assumptions

use super::constraints::Clause;
use super::knowledge_base::ConstraintSystem;
use super::solver::{Deadline, Pin, SearchOutcome, SearchResult, SearchStrategy};
use cadical::{Solver, Timeout};
use log::debug;

/// Incremental CaDiCaL instance loaded once with a constraint system
///
/// Per-variable queries go through `solve_assuming`, so the clause database
/// is never rebuilt between pins.
pub struct CadicalSolver {
    solver: Solver,
    clause_count: usize,
    queries: u64,
}

impl CadicalSolver {
    /// Create a solver holding every clause of `system`
    pub fn new(system: &ConstraintSystem) -> Self {
        let mut solver = Self {
            solver: Solver::new(),
            clause_count: 0,
            queries: 0,
        };
        solver.add_clauses(system.clauses());
        debug!(
            "Loaded {} clauses over {} variables into CaDiCaL",
            solver.clause_count,
            system.variable_count()
        );
        solver
    }

    fn add_clauses(&mut self, clauses: &[Clause]) {
        for clause in clauses {
            self.solver.add_clause(clause.literals.iter().copied());
            self.clause_count += 1;
        }
    }

    /// Solve with `assumptions` holding as unit literals for this call only
    ///
    /// `None` means the solver was interrupted before reaching a result.
    pub fn solve_assuming(&mut self, assumptions: &[i32]) -> Option<bool> {
        self.queries += 1;
        self.solver.solve_with(assumptions.iter().copied())
    }

    pub fn clause_count(&self) -> usize {
        self.clause_count
    }

    /// Number of `solve_assuming` calls made so far
    pub fn queries(&self) -> u64 {
        self.queries
    }

    fn arm_deadline(&mut self, deadline: &Deadline) {
        match deadline.remaining() {
            Some(remaining) => self
                .solver
                .set_callbacks(Some(Timeout::new(remaining.as_secs_f32()))),
            None => self.solver.set_callbacks(None),
        }
    }
}

impl SearchStrategy for CadicalSolver {
    fn name(&self) -> &'static str {
        "cadical"
    }

    fn search(&mut self, system: &ConstraintSystem, pin: Option<Pin>, deadline: &Deadline) -> SearchResult {
        if deadline.is_expired() {
            return SearchResult::new(SearchOutcome::TimedOut, 0);
        }
        self.arm_deadline(deadline);

        let assumptions: Vec<i32> = pin
            .map(|p| {
                let var = system.variables().variable_at(p.index);
                if p.value {
                    var
                } else {
                    -var
                }
            })
            .into_iter()
            .collect();

        let outcome = match self.solve_assuming(&assumptions) {
            Some(true) => SearchOutcome::Satisfiable,
            Some(false) => SearchOutcome::Unsatisfiable,
            None => SearchOutcome::TimedOut,
        };
        SearchResult::new(outcome, 1)
    }
}

impl std::fmt::Debug for CadicalSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CadicalSolver")
            .field("clause_count", &self.clause_count)
            .field("queries", &self.queries)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exactly_one_of_two() -> ConstraintSystem {
        ConstraintSystem::new(vec![Clause::binary(-1, -2), Clause::binary(1, 2)], vec![1, 2])
    }

    #[test]
    fn test_assumptions_are_temporary() {
        let system = exactly_one_of_two();
        let mut solver = CadicalSolver::new(&system);
        assert_eq!(solver.clause_count(), 2);

        assert_eq!(solver.solve_assuming(&[-1, -2]), Some(false));
        // The failed assumptions do not stick
        assert_eq!(solver.solve_assuming(&[-1]), Some(true));
        assert_eq!(solver.solve_assuming(&[]), Some(true));
        assert_eq!(solver.queries(), 3);
    }

    #[test]
    fn test_pins_become_assumptions() {
        // x1 is forced to be a mine
        let system = ConstraintSystem::new(vec![Clause::unit(1), Clause::binary(-1, -2)], vec![1, 2]);
        let mut solver = CadicalSolver::new(&system);

        let safe = solver.search(&system, Some(Pin::safe(0)), &Deadline::none());
        assert_eq!(safe.outcome, SearchOutcome::Unsatisfiable);

        let mine = solver.search(&system, Some(Pin::mine(0)), &Deadline::none());
        assert_eq!(mine.outcome, SearchOutcome::Satisfiable);

        // x2 can never be a mine
        let mine = solver.search(&system, Some(Pin::mine(1)), &Deadline::none());
        assert_eq!(mine.outcome, SearchOutcome::Unsatisfiable);
    }

    #[test]
    fn test_whole_system_contradiction() {
        let system = ConstraintSystem::new(vec![Clause::unit(1), Clause::unit(-1)], vec![1]);
        let mut solver = CadicalSolver::new(&system);
        let result = solver.search(&system, None, &Deadline::none());
        assert_eq!(result.outcome, SearchOutcome::Unsatisfiable);
    }

    #[test]
    fn test_expired_deadline() {
        let system = exactly_one_of_two();
        let mut solver = CadicalSolver::new(&system);
        let result = solver.search(&system, None, &Deadline::after(std::time::Duration::ZERO));
        assert_eq!(result.outcome, SearchOutcome::TimedOut);
        assert_eq!(solver.queries(), 0);
    }
}
