use super::QueryPlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
    /// Set union, duplicates removed
    Union,

    /// Concatenation, duplicates kept
    UnionAll,
}

/// A query combined with the body of an enclosing plan.
#[derive(Debug, Clone, PartialEq)]
pub struct SetOperation {
    pub op: SetOp,
    pub query: QueryPlan,
}
