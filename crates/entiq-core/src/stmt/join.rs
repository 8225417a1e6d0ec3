use super::{Expr, NavPath, QueryPlan, TableAlias};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JoinKind {
    Inner,
    #[default]
    Left,
    Right,
}

/// How a join came to be part of the query.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinOrigin {
    /// Requested with `left_join`, `inner_join` or `right_join`.
    Explicit,

    /// Created by reading a navigation property. Joins with the same path are
    /// shared.
    Implicit(NavPath),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub alias: TableAlias,
    pub entity: String,
    pub table_name: String,
    pub on: Expr,
    pub origin: JoinOrigin,

    /// Rows of a nested query read in place of `table_name`. The nested
    /// query projects every column of `entity`.
    pub subquery: Option<Box<QueryPlan>>,
}

impl Join {
    pub fn is_implicit(&self) -> bool {
        matches!(self.origin, JoinOrigin::Implicit(_))
    }

    pub fn is_subquery(&self) -> bool {
        self.subquery.is_some()
    }

    pub fn path(&self) -> Option<&NavPath> {
        match &self.origin {
            JoinOrigin::Implicit(path) => Some(path),
            JoinOrigin::Explicit => None,
        }
    }
}
