use super::Expr;

/// `expr LIKE pattern`. The pattern uses `%` as the only wildcard.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprLike {
    pub expr: Box<Expr>,
    pub pattern: String,
    pub negated: bool,
}

impl Expr {
    pub fn like(expr: impl Into<Self>, pattern: impl Into<String>) -> Self {
        ExprLike {
            expr: Box::new(expr.into()),
            pattern: pattern.into(),
            negated: false,
        }
        .into()
    }

    pub fn not_like(expr: impl Into<Self>, pattern: impl Into<String>) -> Self {
        ExprLike {
            expr: Box::new(expr.into()),
            pattern: pattern.into(),
            negated: true,
        }
        .into()
    }

    pub fn starts_with(expr: impl Into<Self>, prefix: &str) -> Self {
        Expr::like(expr, format!("{prefix}%"))
    }

    pub fn ends_with(expr: impl Into<Self>, suffix: &str) -> Self {
        Expr::like(expr, format!("%{suffix}"))
    }

    pub fn contains(expr: impl Into<Self>, needle: &str) -> Self {
        Expr::like(expr, format!("%{needle}%"))
    }
}

impl From<ExprLike> for Expr {
    fn from(value: ExprLike) -> Self {
        Self::Like(value)
    }
}
