use crate::stmt::{Expr, ExprColumn, TableAlias, Type};

/// How a soft-deleted row is marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalDeleteStrategy {
    /// A boolean column, `true` once deleted
    Boolean,

    /// A nullable timestamp column, set once deleted
    Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogicalDelete {
    /// Name of the marker column
    pub column: String,

    pub strategy: LogicalDeleteStrategy,
}

impl LogicalDelete {
    pub fn boolean(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            strategy: LogicalDeleteStrategy::Boolean,
        }
    }

    pub fn timestamp(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            strategy: LogicalDeleteStrategy::Timestamp,
        }
    }

    /// The predicate selecting rows that are not deleted, for the column at
    /// `index` of the table bound to `alias`.
    pub fn predicate(&self, alias: TableAlias, index: usize) -> Expr {
        let column = ExprColumn::new(alias, index);

        match self.strategy {
            LogicalDeleteStrategy::Boolean => Expr::eq(column, false),
            LogicalDeleteStrategy::Timestamp => Expr::is_null(column),
        }
    }

    /// Whether a column of type `ty` can carry this strategy's marker.
    pub(super) fn accepts(&self, ty: &Type, nullable: bool) -> bool {
        match self.strategy {
            LogicalDeleteStrategy::Boolean => ty.is_bool(),
            // Timestamps are stored as epoch values or ISO strings.
            LogicalDeleteStrategy::Timestamp => {
                nullable && (ty.is_numeric() || ty.is_string())
            }
        }
    }
}
