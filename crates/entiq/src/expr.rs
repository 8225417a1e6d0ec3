mod aggregate;
pub use aggregate::{count_star, Aggregate};

mod column;
pub use column::Column;

mod into_expr;
pub use into_expr::IntoExpr;

mod predicate;
pub use predicate::{Predicate, PredicateOutput};

use crate::{recorder, Error};

use entiq_core::stmt::{self, BinaryOp, OrderByExpr};

use std::{fmt, marker::PhantomData};

/// A typed expression.
///
/// `T` is the Rust type the expression evaluates to. `ty` is the runtime type:
/// the declared type for columns and the inferred type for literals.
pub struct Expr<T: ?Sized> {
    /// The un-typed expression
    pub(crate) untyped: stmt::Expr,

    pub(crate) ty: stmt::Type,

    /// `T` is the type of the expression
    pub(crate) _p: PhantomData<T>,
}

impl<T: ?Sized> Expr<T> {
    /// Create an expression from the given value.
    pub(crate) fn from_value(value: stmt::Value) -> Self {
        Self {
            ty: value.infer_ty(),
            untyped: stmt::Expr::Value(value),
            _p: PhantomData,
        }
    }

    pub fn from_untyped(untyped: impl Into<stmt::Expr>, ty: stmt::Type) -> Self {
        Self {
            untyped: untyped.into(),
            ty,
            _p: PhantomData,
        }
    }

    pub fn cast<U: ?Sized>(self) -> Expr<U> {
        Expr {
            untyped: self.untyped,
            ty: self.ty,
            _p: PhantomData,
        }
    }

    pub fn untyped(&self) -> &stmt::Expr {
        &self.untyped
    }

    pub fn ty(&self) -> &stmt::Type {
        &self.ty
    }

    pub fn into_untyped(self) -> stmt::Expr {
        self.untyped
    }

    pub fn eq(self, rhs: impl IntoExpr<T>) -> Predicate {
        compare(self, BinaryOp::Eq, rhs.into_expr(), "expression")
    }

    pub fn ne(self, rhs: impl IntoExpr<T>) -> Predicate {
        compare(self, BinaryOp::Ne, rhs.into_expr(), "expression")
    }

    pub fn gt(self, rhs: impl IntoExpr<T>) -> Predicate {
        compare(self, BinaryOp::Gt, rhs.into_expr(), "expression")
    }

    pub fn ge(self, rhs: impl IntoExpr<T>) -> Predicate {
        compare(self, BinaryOp::Ge, rhs.into_expr(), "expression")
    }

    pub fn lt(self, rhs: impl IntoExpr<T>) -> Predicate {
        compare(self, BinaryOp::Lt, rhs.into_expr(), "expression")
    }

    pub fn le(self, rhs: impl IntoExpr<T>) -> Predicate {
        compare(self, BinaryOp::Le, rhs.into_expr(), "expression")
    }

    pub fn is_null(self) -> Predicate {
        Predicate::record(stmt::Expr::is_null(self.untyped))
    }

    pub fn is_not_null(self) -> Predicate {
        Predicate::record(stmt::Expr::is_not_null(self.untyped))
    }

    pub fn asc(self) {
        recorder::record_order(OrderByExpr::asc(self.untyped));
    }

    pub fn desc(self) {
        recorder::record_order(OrderByExpr::desc(self.untyped));
    }
}

impl<T: ?Sized> Clone for Expr<T> {
    fn clone(&self) -> Self {
        Self {
            untyped: self.untyped.clone(),
            ty: self.ty.clone(),
            _p: PhantomData,
        }
    }
}

impl<T: ?Sized> fmt::Debug for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expr")
            .field("untyped", &self.untyped)
            .field("ty", &self.ty)
            .finish()
    }
}

/// Record `lhs op rhs`, reporting `TypeMismatch` when the operand types are
/// not comparable.
pub(crate) fn compare<T: ?Sized>(lhs: Expr<T>, op: BinaryOp, rhs: Expr<T>, name: &str) -> Predicate {
    if !lhs.ty.accepts(&rhs.ty) {
        recorder::record_error(Error::type_mismatch(name, lhs.ty.clone(), rhs.ty.clone()));
    }

    Predicate::record(stmt::Expr::binary_op(lhs.untyped, op, rhs.untyped))
}
