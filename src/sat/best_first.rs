//! Best-first search over dense assignment states

use super::assignment::DenseState;
use super::knowledge_base::{ConstraintSystem, Evaluation};
use super::solver::{Deadline, Pin, SearchOutcome, SearchResult, SearchStrategy};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// How the search generates neighbouring states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Successor {
    /// Partial states; a child assigns one more free variable, h counts open clauses
    #[default]
    Extend,
    /// Total states; a child flips one variable, h counts falsified clauses
    Flip,
}

impl std::fmt::Display for Successor {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Successor::Extend => write!(f, "extend"),
            Successor::Flip => write!(f, "flip"),
        }
    }
}

/// Frontier entry, ordered so the heap pops the lowest `h` and then the newest node
#[derive(Debug)]
struct Node {
    h: usize,
    seq: u64,
    state: DenseState,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        other.h.cmp(&self.h).then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Frontier plus visited set for one search
struct Frontier {
    heap: BinaryHeap<Node>,
    visited: HashSet<DenseState>,
    next_seq: u64,
}

impl Frontier {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            visited: HashSet::new(),
            next_seq: 0,
        }
    }

    /// Whether `state` has been generated before
    fn seen(&self, state: &DenseState) -> bool {
        self.visited.contains(state)
    }

    fn push(&mut self, state: DenseState, h: usize) {
        self.visited.insert(state.clone());
        self.heap.push(Node {
            h,
            seq: self.next_seq,
            state,
        });
        self.next_seq += 1;
    }

    fn pop(&mut self) -> Option<Node> {
        self.heap.pop()
    }
}

/// Heuristic best-first search with a configurable successor model
///
/// Both models are complete on the finite state space: the visited set keeps
/// every generated state, so the frontier eventually empties when no
/// zero-heuristic state exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSearchSolver {
    successor: Successor,
}

impl HeuristicSearchSolver {
    pub fn new(successor: Successor) -> Self {
        Self { successor }
    }

    pub fn successor(&self) -> Successor {
        self.successor
    }

    fn search_extend(&self, system: &ConstraintSystem, pin: Option<Pin>, deadline: &Deadline) -> SearchResult {
        let mut frontier = Frontier::new();
        let root = Pin::initial_state(pin, system.variable_count());
        match system.evaluate_dense(&root).heuristic() {
            Some(h) => frontier.push(root, h),
            None => return SearchResult::new(SearchOutcome::Unsatisfiable, 0),
        }

        let mut nodes = 0u64;
        while let Some(node) = frontier.pop() {
            if deadline.is_expired() {
                return SearchResult::new(SearchOutcome::TimedOut, nodes);
            }
            nodes += 1;

            if node.h == 0 {
                return SearchResult::new(SearchOutcome::Satisfiable, nodes);
            }

            for index in 0..node.state.len() {
                if node.state.is_assigned(index) || Pin::covers(pin, index) {
                    continue;
                }
                for value in [false, true] {
                    let child = node.state.with(index, value);
                    if frontier.seen(&child) {
                        continue;
                    }
                    match system.evaluate_dense(&child) {
                        Evaluation::Violated => {}
                        evaluation => {
                            let h = evaluation.heuristic().unwrap_or_default();
                            frontier.push(child, h);
                        }
                    }
                }
            }
        }

        SearchResult::new(SearchOutcome::Unsatisfiable, nodes)
    }

    fn search_flip(&self, system: &ConstraintSystem, pin: Option<Pin>, deadline: &Deadline) -> SearchResult {
        let mut frontier = Frontier::new();
        let mut root = DenseState::filled(system.variable_count(), false);
        if let Some(p) = pin {
            root.assign(p.index, p.value);
        }
        let h = system.falsified_count(&root);
        frontier.push(root, h);

        let mut nodes = 0u64;
        while let Some(node) = frontier.pop() {
            if deadline.is_expired() {
                return SearchResult::new(SearchOutcome::TimedOut, nodes);
            }
            nodes += 1;

            if node.h == 0 {
                return SearchResult::new(SearchOutcome::Satisfiable, nodes);
            }

            for index in 0..node.state.len() {
                if Pin::covers(pin, index) {
                    continue;
                }
                let flipped = !node.state.get(index).unwrap_or(false);
                let child = node.state.with(index, flipped);
                if frontier.seen(&child) {
                    continue;
                }
                let h = system.falsified_count(&child);
                frontier.push(child, h);
            }
        }

        SearchResult::new(SearchOutcome::Unsatisfiable, nodes)
    }
}

impl SearchStrategy for HeuristicSearchSolver {
    fn name(&self) -> &'static str {
        match self.successor {
            Successor::Extend => "best_first(extend)",
            Successor::Flip => "best_first(flip)",
        }
    }

    fn search(&mut self, system: &ConstraintSystem, pin: Option<Pin>, deadline: &Deadline) -> SearchResult {
        match self.successor {
            Successor::Extend => self.search_extend(system, pin, deadline),
            Successor::Flip => self.search_flip(system, pin, deadline),
        }
    }
}
