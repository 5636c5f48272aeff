//! Search contract shared by every satisfiability strategy

use super::assignment::{Assignment, DenseState};
use super::knowledge_base::ConstraintSystem;
use std::time::{Duration, Instant};

/// Result of one satisfiability query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Satisfiable,
    Unsatisfiable,
    /// The deadline expired before the search reached a conclusion
    TimedOut,
}

/// A variable fixed by the caller and excluded from re-decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    /// Dense index of the variable in the system's variable order
    pub index: usize,
    /// `false` pins the cell safe, `true` pins it as a mine
    pub value: bool,
}

impl Pin {
    pub fn safe(index: usize) -> Self {
        Self { index, value: false }
    }

    pub fn mine(index: usize) -> Self {
        Self { index, value: true }
    }

    /// Whether `index` refers to the pinned variable
    #[inline]
    pub fn covers(pin: Option<Pin>, index: usize) -> bool {
        pin.is_some_and(|p| p.index == index)
    }

    /// Initial dense state with only the pin applied
    pub fn initial_state(pin: Option<Pin>, len: usize) -> DenseState {
        let mut state = DenseState::unassigned(len);
        if let Some(p) = pin {
            state.assign(p.index, p.value);
        }
        state
    }

    /// Sparse assignment holding only the pin
    pub fn initial_assignment(pin: Option<Pin>, system: &ConstraintSystem) -> Assignment {
        match pin {
            Some(p) => Assignment::new().with(system.variables().variable_at(p.index), p.value),
            None => Assignment::new(),
        }
    }
}

/// Wall-clock bound for a single search
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    expires_at: Option<Instant>,
}

impl Deadline {
    /// A deadline that never expires
    pub fn none() -> Self {
        Self { expires_at: None }
    }

    /// A deadline `timeout` from now
    pub fn after(timeout: Duration) -> Self {
        Self {
            expires_at: Some(Instant::now() + timeout),
        }
    }

    /// `Some(timeout)` bounds the search, `None` leaves it unbounded
    pub fn from_timeout(timeout: Option<Duration>) -> Self {
        timeout.map_or_else(Self::none, Self::after)
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }

    /// Time left before expiry; `None` when unbounded
    pub fn remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::none()
    }
}

/// Outcome plus the amount of work spent reaching it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub outcome: SearchOutcome,
    pub nodes_explored: u64,
}

impl SearchResult {
    pub fn new(outcome: SearchOutcome, nodes_explored: u64) -> Self {
        Self {
            outcome,
            nodes_explored,
        }
    }
}

/// A satisfiability procedure over a constraint system
///
/// `search` answers whether some total assignment that agrees with `pin`
/// satisfies every clause. Implementations own any per-search scratch state
/// and must report `TimedOut` once `deadline` has expired.
pub trait SearchStrategy {
    fn name(&self) -> &'static str;

    fn search(&mut self, system: &ConstraintSystem, pin: Option<Pin>, deadline: &Deadline) -> SearchResult;
}
