use super::{Assignments, Expr};

/// Update one row, identified by its primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub entity: String,
    pub table_name: String,

    /// Columns to set
    pub assignments: Assignments,

    /// Primary-key predicate over the base alias
    pub filter: Expr,
}
