use super::{Expr, Type};

use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum AggregateFunc {
    Count,
    Sum,
    Avg,
    Max,
    Min,
}

/// An aggregate function call.
///
/// `arg` is `None` only for `count(*)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprAggregate {
    pub func: AggregateFunc,
    pub arg: Option<Box<Expr>>,
    pub distinct: bool,
}

impl Expr {
    pub fn aggregate(func: AggregateFunc, arg: impl Into<Self>) -> Self {
        ExprAggregate {
            func,
            arg: Some(Box::new(arg.into())),
            distinct: false,
        }
        .into()
    }

    pub fn count_star() -> Self {
        ExprAggregate {
            func: AggregateFunc::Count,
            arg: None,
            distinct: false,
        }
        .into()
    }

    pub fn count_distinct(arg: impl Into<Self>) -> Self {
        ExprAggregate {
            func: AggregateFunc::Count,
            arg: Some(Box::new(arg.into())),
            distinct: true,
        }
        .into()
    }
}

impl AggregateFunc {
    /// The result type of the function applied to an argument of type `arg`.
    pub fn result_ty(self, arg: &Type) -> Type {
        match self {
            Self::Count => Type::I64,
            Self::Sum => arg.summed(),
            Self::Avg => arg.averaged(),
            Self::Max | Self::Min => arg.clone(),
        }
    }
}

impl From<ExprAggregate> for Expr {
    fn from(value: ExprAggregate) -> Self {
        Self::Aggregate(value)
    }
}

impl fmt::Display for AggregateFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Avg => "avg",
            Self::Max => "max",
            Self::Min => "min",
        })
    }
}

impl fmt::Debug for AggregateFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
