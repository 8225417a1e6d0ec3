use super::Expr;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprCase {
    pub branches: Vec<CaseBranch>,
    pub otherwise: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseBranch {
    pub when: Expr,
    pub then: Expr,
}

impl Expr {
    /// `CASE WHEN when THEN then ELSE otherwise END`
    pub fn case_when(when: impl Into<Self>, then: impl Into<Self>, otherwise: impl Into<Self>) -> Self {
        ExprCase {
            branches: vec![CaseBranch {
                when: when.into(),
                then: then.into(),
            }],
            otherwise: Box::new(otherwise.into()),
        }
        .into()
    }
}

impl From<ExprCase> for Expr {
    fn from(value: ExprCase) -> Self {
        Self::Case(value)
    }
}
