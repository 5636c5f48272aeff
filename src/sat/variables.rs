//! Variable ordering and the variable -> dense index table

use std::collections::{BTreeSet, HashMap};

/// Fixed ordering of the SAT variables of one constraint system
#[derive(Debug, Clone, Default)]
pub struct VariableIndex {
    /// Variables in ascending order; position in this vector is the dense index
    variables: Vec<i32>,
    /// Map from variable ID to its dense index
    index_map: HashMap<i32, usize>,
}

impl VariableIndex {
    /// Build the index from any collection of variables; duplicates collapse
    pub fn new<I: IntoIterator<Item = i32>>(variables: I) -> Self {
        let ordered: BTreeSet<i32> = variables.into_iter().collect();
        let variables: Vec<i32> = ordered.into_iter().collect();
        let index_map = variables
            .iter()
            .enumerate()
            .map(|(idx, &var)| (var, idx))
            .collect();

        Self { variables, index_map }
    }

    /// Dense index of a variable
    #[inline]
    pub fn index_of(&self, variable: i32) -> Option<usize> {
        self.index_map.get(&variable).copied()
    }

    /// Variable stored at a dense index
    #[inline]
    pub fn variable_at(&self, index: usize) -> i32 {
        self.variables[index]
    }

    pub fn contains(&self, variable: i32) -> bool {
        self.index_map.contains_key(&variable)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.variables
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.variables.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variables_are_sorted_and_unique() {
        let index = VariableIndex::new(vec![7, 2, 9, 2]);
        assert_eq!(index.as_slice(), &[2, 7, 9]);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_index_lookup() {
        let index = VariableIndex::new(vec![5, 1, 3]);
        assert_eq!(index.index_of(1), Some(0));
        assert_eq!(index.index_of(5), Some(2));
        assert_eq!(index.index_of(4), None);
        assert_eq!(index.variable_at(1), 3);
        assert!(index.contains(3));
        assert!(!index.contains(2));
    }

    #[test]
    fn test_empty_index() {
        let index = VariableIndex::new(Vec::new());
        assert!(index.is_empty());
        assert_eq!(index.iter().count(), 0);
    }
}
