use super::{compare, Aggregate, Expr, IntoExpr, Predicate};
use crate::{cx::QueryCx, query::Projected, recorder, Entity, Error, Query, Result, Summable};

use entiq_core::stmt::{self, AggregateFunc, BinaryOp, OrderByExpr, TableAlias, Type};

use std::{marker::PhantomData, rc::Rc};

/// A typed handle for one column of a table occurrence.
///
/// Operator methods record a statement into the clause being built and
/// return a [`Predicate`] handle for it.
pub struct Column<T> {
    binding: Option<ColumnBinding>,
    name: Rc<str>,
    _p: PhantomData<T>,
}

#[derive(Clone)]
struct ColumnBinding {
    cx: Rc<QueryCx>,
    alias: TableAlias,
    index: usize,
    ty: Type,
}

impl<T> Column<T> {
    pub(crate) fn bound(cx: Rc<QueryCx>, alias: TableAlias, index: usize, ty: Type, name: &str) -> Self {
        Self {
            binding: Some(ColumnBinding {
                cx,
                alias,
                index,
                ty,
            }),
            name: name.into(),
            _p: PhantomData,
        }
    }

    pub(crate) fn poisoned(name: &str) -> Self {
        Self {
            binding: None,
            name: name.into(),
            _p: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared column type. `Null` for a poisoned handle.
    pub fn ty(&self) -> Type {
        self.binding
            .as_ref()
            .map(|binding| binding.ty.clone())
            .unwrap_or(Type::Null)
    }

    /// The column as an expression of the query being recorded. Reading a
    /// column of an enclosing query yields a correlated reference.
    pub fn to_expr(&self) -> Expr<T> {
        let Some(binding) = &self.binding else {
            return Expr::from_value(stmt::Value::Null);
        };

        match recorder::resolve_column(&binding.cx, binding.alias, binding.index) {
            Ok(column) => Expr::from_untyped(column, binding.ty.clone()),
            Err(err) => {
                recorder::record_error(err);
                Expr::from_value(stmt::Value::Null)
            }
        }
    }

    fn untyped(&self) -> stmt::Expr {
        self.to_expr().untyped
    }

    pub fn eq(self, rhs: impl IntoExpr<T>) -> Predicate {
        compare(self.to_expr(), BinaryOp::Eq, rhs.into_expr(), &self.name)
    }

    pub fn ne(self, rhs: impl IntoExpr<T>) -> Predicate {
        compare(self.to_expr(), BinaryOp::Ne, rhs.into_expr(), &self.name)
    }

    pub fn gt(self, rhs: impl IntoExpr<T>) -> Predicate {
        compare(self.to_expr(), BinaryOp::Gt, rhs.into_expr(), &self.name)
    }

    pub fn ge(self, rhs: impl IntoExpr<T>) -> Predicate {
        compare(self.to_expr(), BinaryOp::Ge, rhs.into_expr(), &self.name)
    }

    pub fn lt(self, rhs: impl IntoExpr<T>) -> Predicate {
        compare(self.to_expr(), BinaryOp::Lt, rhs.into_expr(), &self.name)
    }

    pub fn le(self, rhs: impl IntoExpr<T>) -> Predicate {
        compare(self.to_expr(), BinaryOp::Le, rhs.into_expr(), &self.name)
    }

    /// `lower <= column AND column <= upper`, recorded as one statement.
    pub fn range_closed(self, lower: impl IntoExpr<T>, upper: impl IntoExpr<T>) -> Predicate {
        let column = self.to_expr();
        let lower = lower.into_expr();
        let upper = upper.into_expr();

        for bound in [&lower, &upper] {
            self.check_operand(&bound.ty);
        }

        Predicate::record(stmt::Expr::and(
            stmt::Expr::ge(column.untyped.clone(), lower.untyped),
            stmt::Expr::le(column.untyped, upper.untyped),
        ))
    }

    pub fn in_list<I>(self, items: impl IntoIterator<Item = I>) -> Predicate
    where
        I: IntoExpr<T>,
    {
        let list = self.list_operands(items);
        Predicate::record(stmt::Expr::in_list(self.untyped(), list))
    }

    pub fn not_in_list<I>(self, items: impl IntoIterator<Item = I>) -> Predicate
    where
        I: IntoExpr<T>,
    {
        let list = self.list_operands(items);
        Predicate::record(stmt::Expr::not_in_list(self.untyped(), list))
    }

    fn list_operands<I: IntoExpr<T>>(&self, items: impl IntoIterator<Item = I>) -> Vec<stmt::Expr> {
        items
            .into_iter()
            .map(|item| {
                let item = item.into_expr();
                self.check_operand(&item.ty);
                item.untyped
            })
            .collect()
    }

    fn check_operand(&self, ty: &Type) {
        let declared = self.ty();
        if !declared.accepts(ty) {
            recorder::record_error(Error::type_mismatch(&*self.name, declared, ty.clone()));
        }
    }

    /// `column LIKE pattern`, with `%` as the wildcard.
    pub fn like(self, pattern: &str) -> Predicate {
        self.check_operand(&Type::String);
        Predicate::record(stmt::Expr::like(self.untyped(), pattern))
    }

    pub fn starts_with(self, prefix: &str) -> Predicate {
        self.check_operand(&Type::String);
        Predicate::record(stmt::Expr::starts_with(self.untyped(), prefix))
    }

    pub fn ends_with(self, suffix: &str) -> Predicate {
        self.check_operand(&Type::String);
        Predicate::record(stmt::Expr::ends_with(self.untyped(), suffix))
    }

    pub fn contains(self, needle: &str) -> Predicate {
        self.check_operand(&Type::String);
        Predicate::record(stmt::Expr::contains(self.untyped(), needle))
    }

    pub fn is_null(self) -> Predicate {
        Predicate::record(stmt::Expr::is_null(self.untyped()))
    }

    pub fn is_not_null(self) -> Predicate {
        Predicate::record(stmt::Expr::is_not_null(self.untyped()))
    }

    /// `column IN (subquery)`. The subquery must project exactly one
    /// column of a compatible type.
    pub fn in_query<E, F>(self, f: F) -> Predicate
    where
        E: Entity,
        F: FnOnce(Query<E>) -> Result<Projected>,
    {
        let lhs = self.to_expr();

        let Some(parent) = recorder::current_cx()
            .or_else(|| self.binding.as_ref().map(|binding| binding.cx.clone()))
        else {
            recorder::record_error(Error::invalid_statement(
                "`in_query` used outside of a query clause",
            ));
            return Predicate::record(stmt::Expr::null());
        };

        let plan = f(Query::<E>::nested(&parent)).and_then(|projected| {
            let plan = projected.compile()?;
            let shape = plan.shape();

            if shape.len() != 1 || !lhs.ty.accepts(&shape[0]) {
                return Err(Error::invalid_projection(format!(
                    "`in_query` on `{}` requires a single {:?} column, found {:?}",
                    self.name, lhs.ty, shape
                )));
            }

            Ok(plan)
        });

        match plan {
            Ok(plan) => Predicate::record(stmt::Expr::in_subquery(lhs.untyped, plan)),
            Err(err) => {
                recorder::record_error(err);
                Predicate::record(stmt::Expr::null())
            }
        }
    }

    pub fn asc(self) {
        recorder::record_order(OrderByExpr::asc(self.untyped()));
    }

    pub fn desc(self) {
        recorder::record_order(OrderByExpr::desc(self.untyped()));
    }

    pub fn count(self) -> Aggregate<i64> {
        Aggregate::new(AggregateFunc::Count, Some(self.untyped()), false, Type::I64)
    }

    pub fn count_distinct(self) -> Aggregate<i64> {
        Aggregate::new(AggregateFunc::Count, Some(self.untyped()), true, Type::I64)
    }

    pub fn sum(self) -> Aggregate<T::Sum>
    where
        T: Summable,
    {
        let ty = AggregateFunc::Sum.result_ty(&self.ty());
        Aggregate::new(AggregateFunc::Sum, Some(self.untyped()), false, ty)
    }

    pub fn avg(self) -> Aggregate<f64> {
        let ty = AggregateFunc::Avg.result_ty(&self.ty());
        Aggregate::new(AggregateFunc::Avg, Some(self.untyped()), false, ty)
    }

    pub fn max(self) -> Aggregate<T> {
        Aggregate::new(AggregateFunc::Max, Some(self.untyped()), false, self.ty())
    }

    pub fn min(self) -> Aggregate<T> {
        Aggregate::new(AggregateFunc::Min, Some(self.untyped()), false, self.ty())
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            binding: self.binding.clone(),
            name: self.name.clone(),
            _p: PhantomData,
        }
    }
}
