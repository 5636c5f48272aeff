//! Sparse and dense assignment representations

use super::variables::VariableIndex;
use std::collections::BTreeMap;

/// Partial mapping from variables to truth values (`true` = mine)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Assignment {
    values: BTreeMap<i32, bool>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style assignment of a single variable
    pub fn with(mut self, variable: i32, value: bool) -> Self {
        self.assign(variable, value);
        self
    }

    pub fn assign(&mut self, variable: i32, value: bool) {
        self.values.insert(variable, value);
    }

    pub fn unassign(&mut self, variable: i32) {
        self.values.remove(&variable);
    }

    pub fn get(&self, variable: i32) -> Option<bool> {
        self.values.get(&variable).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, bool)> + '_ {
        self.values.iter().map(|(&var, &value)| (var, value))
    }

    /// Dense form in the order of `variables`; variables outside the index are dropped
    pub fn to_dense(&self, variables: &VariableIndex) -> DenseState {
        let mut state = DenseState::unassigned(variables.len());
        for (var, value) in self.iter() {
            if let Some(idx) = variables.index_of(var) {
                state.assign(idx, value);
            }
        }
        state
    }
}

impl FromIterator<(i32, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (i32, bool)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Fixed-order tri-state vector; `None` marks an unassigned variable
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DenseState {
    values: Vec<Option<bool>>,
}

impl DenseState {
    /// State with every variable unassigned
    pub fn unassigned(len: usize) -> Self {
        Self {
            values: vec![None; len],
        }
    }

    /// Total state with every variable set to `value`
    pub fn filled(len: usize, value: bool) -> Self {
        Self {
            values: vec![Some(value); len],
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        self.values[index]
    }

    #[inline]
    pub fn assign(&mut self, index: usize, value: bool) {
        self.values[index] = Some(value);
    }

    #[inline]
    pub fn clear(&mut self, index: usize) {
        self.values[index] = None;
    }

    /// Copy of this state with one position assigned
    pub fn with(&self, index: usize, value: bool) -> Self {
        let mut child = self.clone();
        child.assign(index, value);
        child
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_assigned(&self, index: usize) -> bool {
        self.values[index].is_some()
    }

    pub fn is_total(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    pub fn assigned_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }

    pub fn values(&self) -> &[Option<bool>] {
        &self.values
    }

    /// Sparse form using the variable order of `variables`
    pub fn to_assignment(&self, variables: &VariableIndex) -> Assignment {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(idx, value)| value.map(|v| (variables.variable_at(idx), v)))
            .collect()
    }
}
