//! Exhaustive enumeration baseline

use super::knowledge_base::ConstraintSystem;
use super::solver::{Deadline, Pin, SearchOutcome, SearchResult, SearchStrategy};
use itertools::Itertools;

/// Tries every total assignment of the free variables, smallest mine sets first
///
/// Cost is `2^free` evaluations in the worst case, so this is only a
/// correctness reference for small grids.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveEnumerationSolver;

impl ExhaustiveEnumerationSolver {
    pub fn new() -> Self {
        Self
    }
}

impl SearchStrategy for ExhaustiveEnumerationSolver {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn search(&mut self, system: &ConstraintSystem, pin: Option<Pin>, deadline: &Deadline) -> SearchResult {
        let variables = system.variables();
        let free: Vec<i32> = (0..variables.len())
            .filter(|&idx| !Pin::covers(pin, idx))
            .map(|idx| variables.variable_at(idx))
            .collect();

        let mut nodes = 0u64;
        for size in 0..=free.len() {
            for mines in free.iter().combinations(size) {
                if deadline.is_expired() {
                    return SearchResult::new(SearchOutcome::TimedOut, nodes);
                }
                nodes += 1;

                let mut assignment = Pin::initial_assignment(pin, system);
                for &var in &free {
                    assignment.assign(var, false);
                }
                for &&var in &mines {
                    assignment.assign(var, true);
                }

                if system.is_satisfied(&assignment) {
                    return SearchResult::new(SearchOutcome::Satisfiable, nodes);
                }
            }
        }

        SearchResult::new(SearchOutcome::Unsatisfiable, nodes)
    }
}
