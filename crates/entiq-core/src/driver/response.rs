use crate::{stmt::Record, Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Operation result, one record per row
    Values(Vec<Record>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn values(values: impl IntoIterator<Item = Record>) -> Self {
        Self {
            rows: Rows::Values(values.into_iter().collect()),
        }
    }

    pub fn empty_values() -> Self {
        Self {
            rows: Rows::Values(vec![]),
        }
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }

    /// The affected row count. A row set counts its rows.
    pub fn into_count(self) -> u64 {
        match self {
            Rows::Count(count) => count,
            Rows::Values(values) => values.len() as u64,
        }
    }

    pub fn into_values(self) -> Result<Vec<Record>> {
        match self {
            Rows::Values(values) => Ok(values),
            Rows::Count(_) => Err(Error::driver_response("expected rows, received a count")),
        }
    }
}
