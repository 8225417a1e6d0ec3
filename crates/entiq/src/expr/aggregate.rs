use super::{compare, Expr, IntoExpr, Predicate, PredicateOutput};
use crate::recorder::{self, SinkKind};

use entiq_core::stmt::{self, AggregateFunc, BinaryOp, OrderByExpr, Type};

use std::marker::PhantomData;

/// An aggregate function call over a column, or `count(*)`.
pub struct Aggregate<T> {
    func: AggregateFunc,
    arg: Option<stmt::Expr>,
    distinct: bool,
    pub(crate) ty: Type,
    _p: PhantomData<T>,
}

/// `count(*)`
pub fn count_star() -> Aggregate<i64> {
    Aggregate::new(AggregateFunc::Count, None, false, Type::I64)
}

impl<T> Aggregate<T> {
    pub(crate) fn new(func: AggregateFunc, arg: Option<stmt::Expr>, distinct: bool, ty: Type) -> Self {
        Self {
            func,
            arg,
            distinct,
            ty,
            _p: PhantomData,
        }
    }

    /// Restrict the aggregate to rows matching the predicates recorded by
    /// `f`. The argument becomes `CASE WHEN filter THEN arg ELSE NULL END`.
    pub fn filter<R: PredicateOutput>(mut self, f: impl FnOnce() -> R) -> Self {
        let ((), sink) = recorder::nested(SinkKind::predicates(), || f().finish());
        let filter = stmt::Expr::and_from_vec(sink.into_predicates());

        let then = self.arg.take().unwrap_or_else(|| stmt::Expr::from(1_i64));
        self.arg = Some(stmt::Expr::case_when(filter, then, stmt::Expr::null()));
        self
    }

    pub(crate) fn to_untyped(&self) -> stmt::Expr {
        stmt::ExprAggregate {
            func: self.func,
            arg: self.arg.clone().map(Box::new),
            distinct: self.distinct,
        }
        .into()
    }

    pub(crate) fn into_untyped(self) -> stmt::Expr {
        stmt::ExprAggregate {
            func: self.func,
            arg: self.arg.map(Box::new),
            distinct: self.distinct,
        }
        .into()
    }

    pub fn eq(self, rhs: impl IntoExpr<T>) -> Predicate {
        compare(self.into_expr(), BinaryOp::Eq, rhs.into_expr(), "aggregate")
    }

    pub fn ne(self, rhs: impl IntoExpr<T>) -> Predicate {
        compare(self.into_expr(), BinaryOp::Ne, rhs.into_expr(), "aggregate")
    }

    pub fn gt(self, rhs: impl IntoExpr<T>) -> Predicate {
        compare(self.into_expr(), BinaryOp::Gt, rhs.into_expr(), "aggregate")
    }

    pub fn ge(self, rhs: impl IntoExpr<T>) -> Predicate {
        compare(self.into_expr(), BinaryOp::Ge, rhs.into_expr(), "aggregate")
    }

    pub fn lt(self, rhs: impl IntoExpr<T>) -> Predicate {
        compare(self.into_expr(), BinaryOp::Lt, rhs.into_expr(), "aggregate")
    }

    pub fn le(self, rhs: impl IntoExpr<T>) -> Predicate {
        compare(self.into_expr(), BinaryOp::Le, rhs.into_expr(), "aggregate")
    }

    pub fn asc(self) {
        recorder::record_order(OrderByExpr::asc(self.into_untyped()));
    }

    pub fn desc(self) {
        recorder::record_order(OrderByExpr::desc(self.into_untyped()));
    }
}

impl<T> From<Aggregate<T>> for Expr<T> {
    fn from(value: Aggregate<T>) -> Self {
        value.into_expr()
    }
}
