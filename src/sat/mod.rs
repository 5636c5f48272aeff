//! CNF encoding and satisfiability search for minesweeper grids

pub mod assignment;
pub mod backtracking;
pub mod best_first;
pub mod brute_force;
pub mod cadical_solver;
pub mod constraints;
pub mod knowledge_base;
pub mod solver;
pub mod solver_factory;
pub mod variables;

pub use assignment::{Assignment, DenseState};
pub use backtracking::BacktrackingSolver;
pub use best_first::{HeuristicSearchSolver, Successor};
pub use brute_force::ExhaustiveEnumerationSolver;
pub use cadical_solver::CadicalSolver;
pub use constraints::{Clause, ComplexityLevel, ConstraintEncoder, ConstraintStatistics};
pub use knowledge_base::{ConstraintSystem, Evaluation};
pub use solver::{Deadline, Pin, SearchOutcome, SearchResult, SearchStrategy};
pub use solver_factory::UnifiedSolver;
pub use variables::VariableIndex;
