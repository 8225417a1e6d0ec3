use super::{Aggregate, Column, Expr, Predicate};

use entiq_core::stmt::{self, Value};

pub trait IntoExpr<T: ?Sized> {
    fn into_expr(self) -> Expr<T>;

    fn by_ref(&self) -> Expr<T>;
}

macro_rules! impl_into_expr_for_copy {
    ( $( $var:ident($t:ty) ;)* ) => {
        $(
            impl IntoExpr<$t> for $t {
                fn into_expr(self) -> Expr<$t> {
                    Expr::from_value(Value::$var(self))
                }

                fn by_ref(&self) -> Expr<$t> {
                    Expr::from_value(Value::$var(*self))
                }
            }
        )*
    };
}

impl_into_expr_for_copy! {
    Bool(bool);
    I32(i32);
    I64(i64);
    F64(f64);
}

impl<T: ?Sized> IntoExpr<T> for Expr<T> {
    fn into_expr(self) -> Self {
        self
    }

    fn by_ref(&self) -> Self {
        self.clone()
    }
}

impl<T: IntoExpr<T> + ?Sized> IntoExpr<T> for &T {
    fn into_expr(self) -> Expr<T> {
        self.by_ref()
    }

    fn by_ref(&self) -> Expr<T> {
        (*self).by_ref()
    }
}

impl<T: IntoExpr<T>> IntoExpr<Self> for Option<T> {
    fn into_expr(self) -> Expr<Self> {
        match self {
            Some(value) => value.into_expr().cast(),
            None => Expr::from_value(Value::Null),
        }
    }

    fn by_ref(&self) -> Expr<Self> {
        match self {
            Some(value) => value.by_ref().cast(),
            None => Expr::from_value(Value::Null),
        }
    }
}

impl<T: IntoExpr<T>> IntoExpr<Option<T>> for T {
    fn into_expr(self) -> Expr<Option<T>> {
        self.into_expr().cast()
    }

    fn by_ref(&self) -> Expr<Option<T>> {
        self.by_ref().cast()
    }
}

impl IntoExpr<String> for &str {
    fn into_expr(self) -> Expr<String> {
        Expr::from_value(Value::from(self))
    }

    fn by_ref(&self) -> Expr<String> {
        Expr::from_value(Value::from(*self))
    }
}

impl IntoExpr<Option<String>> for &str {
    fn into_expr(self) -> Expr<Option<String>> {
        Expr::from_value(Value::from(self))
    }

    fn by_ref(&self) -> Expr<Option<String>> {
        Expr::from_value(Value::from(*self))
    }
}

impl IntoExpr<Self> for String {
    fn into_expr(self) -> Expr<Self> {
        Expr::from_value(self.into())
    }

    fn by_ref(&self) -> Expr<Self> {
        Expr::from_value(self.into())
    }
}

impl IntoExpr<Self> for Value {
    fn into_expr(self) -> Expr<Self> {
        Expr::from_value(self)
    }

    fn by_ref(&self) -> Expr<Self> {
        Expr::from_value(self.clone())
    }
}

impl<T> IntoExpr<T> for Column<T> {
    fn into_expr(self) -> Expr<T> {
        self.to_expr()
    }

    fn by_ref(&self) -> Expr<T> {
        self.to_expr()
    }
}

impl<T> IntoExpr<T> for &Column<T> {
    fn into_expr(self) -> Expr<T> {
        self.to_expr()
    }

    fn by_ref(&self) -> Expr<T> {
        self.to_expr()
    }
}

impl<T> IntoExpr<T> for Aggregate<T> {
    fn into_expr(self) -> Expr<T> {
        let ty = self.ty.clone();
        Expr::from_untyped(self.into_untyped(), ty)
    }

    fn by_ref(&self) -> Expr<T> {
        Expr::from_untyped(self.to_untyped(), self.ty.clone())
    }
}

impl IntoExpr<bool> for Predicate {
    fn into_expr(self) -> Expr<bool> {
        Expr::from_untyped(self.detach(), stmt::Type::Bool)
    }

    fn by_ref(&self) -> Expr<bool> {
        Expr::from_untyped(self.expr().clone(), stmt::Type::Bool)
    }
}
