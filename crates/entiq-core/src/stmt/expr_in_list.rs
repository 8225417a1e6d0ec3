use super::Expr;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprInList {
    pub expr: Box<Expr>,
    pub list: Vec<Expr>,
    pub negated: bool,
}

impl Expr {
    pub fn in_list(lhs: impl Into<Self>, list: Vec<Expr>) -> Self {
        ExprInList {
            expr: Box::new(lhs.into()),
            list,
            negated: false,
        }
        .into()
    }

    pub fn not_in_list(lhs: impl Into<Self>, list: Vec<Expr>) -> Self {
        ExprInList {
            expr: Box::new(lhs.into()),
            list,
            negated: true,
        }
        .into()
    }
}

impl From<ExprInList> for Expr {
    fn from(value: ExprInList) -> Self {
        Self::InList(value)
    }
}
