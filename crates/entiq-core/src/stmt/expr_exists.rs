use super::{Expr, QueryPlan};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprExists {
    pub subquery: Box<QueryPlan>,
    pub negated: bool,
}

impl Expr {
    pub fn exists(subquery: QueryPlan) -> Self {
        ExprExists {
            subquery: Box::new(subquery),
            negated: false,
        }
        .into()
    }

    pub fn not_exists(subquery: QueryPlan) -> Self {
        ExprExists {
            subquery: Box::new(subquery),
            negated: true,
        }
        .into()
    }
}

impl From<ExprExists> for Expr {
    fn from(value: ExprExists) -> Self {
        Self::Exists(value)
    }
}
