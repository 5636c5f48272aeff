//! Constraint system (knowledge base) and its satisfaction contracts

use super::assignment::{Assignment, DenseState};
use super::constraints::{Clause, ClauseStatus};
use super::variables::VariableIndex;

/// Outcome of evaluating an assignment against every clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// Every clause has a true literal
    Satisfied,
    /// Some clause has all its variables assigned and no true literal
    Violated,
    /// No clause is violated; the count is the number of still-open clauses
    Undetermined(usize),
}

impl Evaluation {
    /// Search heuristic: open clauses, 0 once satisfied, `None` when violated
    pub fn heuristic(&self) -> Option<usize> {
        match self {
            Evaluation::Satisfied => Some(0),
            Evaluation::Undetermined(count) => Some(*count),
            Evaluation::Violated => None,
        }
    }

    pub fn is_violated(&self) -> bool {
        matches!(self, Evaluation::Violated)
    }

    pub fn is_satisfied(&self) -> bool {
        matches!(self, Evaluation::Satisfied)
    }
}

/// Clauses plus the ordered variable set they range over
///
/// Built once per solve from a grid snapshot and never mutated afterwards, so
/// it can be shared by reference between search workers.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSystem {
    clauses: Vec<Clause>,
    variables: VariableIndex,
}

impl ConstraintSystem {
    /// Create a system; variables mentioned by clauses are added to `variables`
    pub fn new<I: IntoIterator<Item = i32>>(clauses: Vec<Clause>, variables: I) -> Self {
        let mentioned = clauses.iter().flat_map(|clause| clause.variables());
        let variables = VariableIndex::new(variables.into_iter().chain(mentioned));
        Self { clauses, variables }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn variables(&self) -> &VariableIndex {
        &self.variables
    }

    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Whether the system contains the empty clause and can never be satisfied
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    /// Ternary evaluation of a sparse (possibly partial) assignment
    pub fn evaluate(&self, assignment: &Assignment) -> Evaluation {
        self.evaluate_with(|var| assignment.get(var))
    }

    /// Ternary evaluation of a dense tri-state vector
    pub fn evaluate_dense(&self, state: &DenseState) -> Evaluation {
        self.evaluate_with(|var| self.variables.index_of(var).and_then(|idx| state.get(idx)))
    }

    fn evaluate_with<F>(&self, value_of: F) -> Evaluation
    where
        F: Fn(i32) -> Option<bool>,
    {
        let mut undetermined = 0;
        for clause in &self.clauses {
            match clause.status(&value_of) {
                ClauseStatus::Satisfied => {}
                ClauseStatus::Undetermined => undetermined += 1,
                ClauseStatus::Violated => return Evaluation::Violated,
            }
        }

        if undetermined == 0 {
            Evaluation::Satisfied
        } else {
            Evaluation::Undetermined(undetermined)
        }
    }

    /// Boolean contract: every clause has a literal made true by `assignment`
    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.status(|var| assignment.get(var)) == ClauseStatus::Satisfied)
    }

    /// Number of clauses without a true literal under a dense state
    ///
    /// On a total state this is the falsified-clause count used by the flip
    /// successor model of the best-first search.
    pub fn falsified_count(&self, state: &DenseState) -> usize {
        self.clauses
            .iter()
            .filter(|clause| {
                clause.status(|var| self.variables.index_of(var).and_then(|idx| state.get(idx)))
                    != ClauseStatus::Satisfied
            })
            .count()
    }
}
