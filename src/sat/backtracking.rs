//! Depth-first search with per-clause pruning

use super::assignment::DenseState;
use super::knowledge_base::{ConstraintSystem, Evaluation};
use super::solver::{Deadline, Pin, SearchOutcome, SearchResult, SearchStrategy};

/// Depth-first search over the fixed variable order
///
/// Every node evaluates the partial state: a violated clause prunes the
/// branch, and a state that already satisfies every clause ends the search
/// with the remaining variables left as don't-care.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktrackingSolver {
    nodes: u64,
}

impl BacktrackingSolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn descend(
        &mut self,
        system: &ConstraintSystem,
        state: &mut DenseState,
        next: usize,
        pin: Option<Pin>,
        deadline: &Deadline,
    ) -> SearchOutcome {
        if deadline.is_expired() {
            return SearchOutcome::TimedOut;
        }
        self.nodes += 1;

        match system.evaluate_dense(state) {
            Evaluation::Satisfied => return SearchOutcome::Satisfiable,
            Evaluation::Violated => return SearchOutcome::Unsatisfiable,
            Evaluation::Undetermined(_) => {}
        }

        // Undetermined clauses always leave a free variable somewhere ahead
        let Some(index) = (next..state.len()).find(|&idx| !Pin::covers(pin, idx)) else {
            return SearchOutcome::Unsatisfiable;
        };

        for value in [false, true] {
            state.assign(index, value);
            let outcome = self.descend(system, state, index + 1, pin, deadline);
            state.clear(index);

            if outcome != SearchOutcome::Unsatisfiable {
                return outcome;
            }
        }

        SearchOutcome::Unsatisfiable
    }
}

impl SearchStrategy for BacktrackingSolver {
    fn name(&self) -> &'static str {
        "backtracking"
    }

    fn search(&mut self, system: &ConstraintSystem, pin: Option<Pin>, deadline: &Deadline) -> SearchResult {
        self.nodes = 0;
        let mut state = Pin::initial_state(pin, system.variable_count());
        let outcome = self.descend(system, &mut state, 0, pin, deadline);
        SearchResult::new(outcome, self.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::constraints::Clause;
    use std::time::Duration;

    #[test]
    fn test_forced_mine_is_refuted() {
        let system = ConstraintSystem::new(vec![Clause::unit(1), Clause::binary(-1, -2)], vec![1, 2]);
        let result = BacktrackingSolver::new().search(&system, Some(Pin::safe(0)), &Deadline::none());
        assert_eq!(result.outcome, SearchOutcome::Unsatisfiable);
        // The root is violated immediately
        assert_eq!(result.nodes_explored, 1);
    }

    #[test]
    fn test_satisfied_partial_state_stops_early() {
        // x1 ∨ x2 ∨ x3 is satisfied as soon as x1 is a mine
        let system = ConstraintSystem::new(vec![Clause::new(vec![1, 2, 3])], vec![1, 2, 3]);
        let result = BacktrackingSolver::new().search(&system, Some(Pin::mine(0)), &Deadline::none());
        assert_eq!(result.outcome, SearchOutcome::Satisfiable);
        assert_eq!(result.nodes_explored, 1);
    }

    #[test]
    fn test_pinned_variable_is_skipped() {
        // Exactly one of x1, x2 with x2 pinned safe: x1 has to become a mine
        let system = ConstraintSystem::new(vec![Clause::binary(-1, -2), Clause::binary(1, 2)], vec![1, 2]);
        let result = BacktrackingSolver::new().search(&system, Some(Pin::safe(1)), &Deadline::none());
        assert_eq!(result.outcome, SearchOutcome::Satisfiable);
    }

    #[test]
    fn test_whole_system_contradiction() {
        let system = ConstraintSystem::new(
            vec![Clause::binary(1, 2), Clause::binary(-1, 2), Clause::binary(1, -2), Clause::binary(-1, -2)],
            vec![1, 2],
        );
        let result = BacktrackingSolver::new().search(&system, None, &Deadline::none());
        assert_eq!(result.outcome, SearchOutcome::Unsatisfiable);
    }

    #[test]
    fn test_node_count_resets_between_searches() {
        let system = ConstraintSystem::new(vec![Clause::binary(1, 2)], vec![1, 2]);
        let mut solver = BacktrackingSolver::new();
        let first = solver.search(&system, Some(Pin::safe(0)), &Deadline::none());
        let second = solver.search(&system, Some(Pin::safe(0)), &Deadline::none());
        assert_eq!(first, second);
    }

    #[test]
    fn test_expired_deadline() {
        let system = ConstraintSystem::new(vec![Clause::binary(1, 2)], vec![1, 2]);
        let deadline = Deadline::after(Duration::ZERO);
        let result = BacktrackingSolver::new().search(&system, None, &deadline);
        assert_eq!(result.outcome, SearchOutcome::TimedOut);
    }
}
