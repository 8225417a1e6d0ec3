use super::{Expr, QueryPlan};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprInSubquery {
    pub expr: Box<Expr>,
    pub subquery: Box<QueryPlan>,
    pub negated: bool,
}

impl Expr {
    pub fn in_subquery(lhs: impl Into<Self>, subquery: QueryPlan) -> Self {
        ExprInSubquery {
            expr: Box::new(lhs.into()),
            subquery: Box::new(subquery),
            negated: false,
        }
        .into()
    }
}

impl From<ExprInSubquery> for Expr {
    fn from(value: ExprInSubquery) -> Self {
        Self::InSubquery(value)
    }
}
