use super::Expr;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprNot {
    pub expr: Box<Expr>,
}

impl Expr {
    pub fn not(expr: impl Into<Self>) -> Self {
        ExprNot {
            expr: Box::new(expr.into()),
        }
        .into()
    }

    pub fn is_not(&self) -> bool {
        matches!(self, Self::Not(_))
    }
}

impl From<ExprNot> for Expr {
    fn from(value: ExprNot) -> Self {
        Self::Not(value)
    }
}
