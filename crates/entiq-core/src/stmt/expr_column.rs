use super::{Expr, TableAlias};

use std::fmt;

/// A reference to a column of one table in a query.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct ExprColumn {
    /// Query scope nesting level: 0 = current query, 1+ = enclosing queries
    pub nesting: usize,

    /// The table occurrence the column belongs to, resolved in the query
    /// `nesting` levels up.
    pub table: TableAlias,

    /// The index of the column in its entity's declaration order
    pub column: usize,
}

impl Expr {
    pub fn column(column: impl Into<ExprColumn>) -> Self {
        column.into().into()
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column(_))
    }

    pub fn as_column(&self) -> Option<&ExprColumn> {
        match self {
            Self::Column(column) => Some(column),
            _ => None,
        }
    }
}

impl ExprColumn {
    /// Create a new ExprColumn reference to a column in the current query scope.
    pub fn new(table: TableAlias, column: usize) -> Self {
        ExprColumn {
            nesting: 0,
            table,
            column,
        }
    }

    /// Create a new ExprColumn reference with a specific nesting level.
    pub fn with_nesting(nesting: usize, table: TableAlias, column: usize) -> Self {
        ExprColumn {
            nesting,
            table,
            column,
        }
    }

    pub fn is_correlated(&self) -> bool {
        self.nesting > 0
    }
}

impl From<ExprColumn> for Expr {
    fn from(value: ExprColumn) -> Self {
        Self::Column(value)
    }
}

impl fmt::Debug for ExprColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nesting > 0 {
            write!(f, "^{}.", self.nesting)?;
        }
        write!(f, "{}.c{}", self.table, self.column)
    }
}
