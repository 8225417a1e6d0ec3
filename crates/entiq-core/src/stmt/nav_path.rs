use super::TableAlias;

use std::fmt;

/// The access path that produced an implicit join: the table the first
/// navigation was read from, followed by navigation names.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NavPath {
    pub origin: TableAlias,
    pub steps: Vec<String>,
}

impl NavPath {
    /// Marker step registering the mapping-table join of a many-to-many
    /// navigation.
    pub const MAPPING: &'static str = "#mapping";

    pub fn root(origin: TableAlias) -> Self {
        Self {
            origin,
            steps: vec![],
        }
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn child(&self, step: impl Into<String>) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step.into());
        Self {
            origin: self.origin,
            steps,
        }
    }

    pub fn last(&self) -> Option<&str> {
        self.steps.last().map(String::as_str)
    }
}

impl fmt::Display for NavPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.origin)?;
        for step in &self.steps {
            write!(f, ".{step}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for NavPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
