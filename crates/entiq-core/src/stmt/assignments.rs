use super::Value;

use indexmap::IndexMap;

/// Column assignments of an update, keyed by column index and kept in the
/// order they were added.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assignments {
    assignments: IndexMap<usize, Assignment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Column name, for diagnostics and drivers that address columns by name
    pub name: String,

    /// The new value
    pub value: Value,
}

impl Assignments {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            assignments: IndexMap::with_capacity(capacity),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn contains(&self, column: usize) -> bool {
        self.assignments.contains_key(&column)
    }

    pub fn get(&self, column: usize) -> Option<&Assignment> {
        self.assignments.get(&column)
    }

    pub fn set(&mut self, column: usize, name: impl Into<String>, value: impl Into<Value>) {
        self.assignments.insert(
            column,
            Assignment {
                name: name.into(),
                value: value.into(),
            },
        );
    }

    pub fn columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.assignments.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Assignment)> + '_ {
        self.assignments.iter().map(|(column, assignment)| (*column, assignment))
    }
}
