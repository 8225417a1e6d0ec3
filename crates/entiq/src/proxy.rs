//! Table handles: the binding between a generated proxy and one table
//! occurrence of a query.

use crate::{
    cx::{Binding, QueryCx},
    expr::Column,
    query::Query,
    recorder, Entity, EntityProxy, Error, Predicate, Primitive, Result,
};

use entiq_core::stmt::{self, Expr, TableAlias};

use std::rc::Rc;

/// A proxy's binding to a table occurrence in a query.
///
/// A handle whose binding failed (unknown navigation, wrong proxy type) is
/// *poisoned*: the failure is reported to the clause being recorded and every
/// column read through the handle yields `NULL`.
#[derive(Clone)]
pub struct TableHandle {
    cx: Rc<QueryCx>,
    binding: Option<Binding>,
}

/// Every column of one table, in declaration order.
pub struct AllColumns {
    pub(crate) items: Vec<stmt::ProjectionItem>,
}

impl TableHandle {
    pub(crate) fn new(cx: Rc<QueryCx>, alias: TableAlias) -> TableHandle {
        let binding = cx.binding(alias);
        TableHandle { cx, binding }
    }

    fn poisoned(cx: Rc<QueryCx>) -> TableHandle {
        TableHandle { cx, binding: None }
    }

    /// The alias this handle is bound to.
    pub fn alias(&self) -> Option<TableAlias> {
        self.binding.as_ref().map(|binding| binding.alias)
    }

    /// Name of the bound entity.
    pub fn entity(&self) -> Option<&str> {
        self.binding.as_ref().map(|binding| binding.entity.as_str())
    }

    pub fn is_poisoned(&self) -> bool {
        self.binding.is_none()
    }

    /// A typed handle for the column `name`.
    ///
    /// Fails with `UnknownColumn` if the entity has no such column, and with
    /// `TypeMismatch` if `T` does not match the declared column type.
    pub fn column<T: Primitive>(&self, name: &str) -> Column<T> {
        match self.try_column::<T>(name) {
            Ok(column) => column,
            Err(err) => {
                recorder::record_error(err);
                Column::poisoned(name)
            }
        }
    }

    fn try_column<T: Primitive>(&self, name: &str) -> Result<Column<T>> {
        let Some(binding) = &self.binding else {
            return Ok(Column::poisoned(name));
        };

        let entity = self.cx.schema.resolve(&binding.entity)?;
        let (index, column) = entity.resolve_column(name)?;

        if !T::TYPE.is_null() && !column.ty.accepts(&T::TYPE) {
            return Err(Error::type_mismatch(
                format!("{}.{}", entity.name, name),
                column.ty.clone(),
                T::TYPE,
            ));
        }

        Ok(Column::bound(
            self.cx.clone(),
            binding.alias,
            index,
            column.ty.clone(),
            name,
        ))
    }

    /// The proxy for the navigation `name`, joining the related table
    /// implicitly.
    pub fn navigate<P: EntityProxy>(&self, name: &str) -> P {
        match self.try_navigate::<P>(name) {
            Ok(handle) => P::from_table(handle),
            Err(err) => {
                recorder::record_error(err);
                P::from_table(TableHandle::poisoned(self.cx.clone()))
            }
        }
    }

    fn try_navigate<P: EntityProxy>(&self, name: &str) -> Result<TableHandle> {
        let Some(binding) = &self.binding else {
            return Ok(TableHandle::poisoned(self.cx.clone()));
        };

        let target = self.cx.navigate(binding, name)?;

        if target.entity != <P::Entity as Entity>::NAME {
            return Err(Error::invalid_statement(format!(
                "navigation `{}.{}` leads to `{}`, not `{}`",
                binding.entity,
                name,
                target.entity,
                <P::Entity as Entity>::NAME
            )));
        }

        Ok(TableHandle {
            cx: self.cx.clone(),
            binding: Some(target),
        })
    }

    /// Every column of the table, for use as a projection.
    pub fn all_columns(&self) -> AllColumns {
        let Some(binding) = &self.binding else {
            return AllColumns { items: vec![] };
        };

        let entity = match self.cx.schema.resolve(&binding.entity) {
            Ok(entity) => entity,
            Err(err) => {
                recorder::record_error(err);
                return AllColumns { items: vec![] };
            }
        };

        let mut items = Vec::with_capacity(entity.columns.len());

        for (index, column) in entity.columns.iter().enumerate() {
            match recorder::resolve_column(&self.cx, binding.alias, index) {
                Ok(expr) => items.push(stmt::ProjectionItem {
                    expr: Expr::column(expr),
                    ty: column.ty.clone(),
                }),
                Err(err) => {
                    recorder::record_error(err);
                    return AllColumns { items: vec![] };
                }
            }
        }

        AllColumns { items }
    }

    /// `EXISTS` over a subquery correlated with the query being recorded.
    pub fn exists<E, F>(&self, f: F) -> Predicate
    where
        E: Entity,
        F: FnOnce(Query<E>) -> Result<Query<E>>,
    {
        self.subquery(f, false)
    }

    /// `NOT EXISTS` over a subquery correlated with the query being recorded.
    pub fn not_exists<E, F>(&self, f: F) -> Predicate
    where
        E: Entity,
        F: FnOnce(Query<E>) -> Result<Query<E>>,
    {
        self.subquery(f, true)
    }

    fn subquery<E, F>(&self, f: F, negated: bool) -> Predicate
    where
        E: Entity,
        F: FnOnce(Query<E>) -> Result<Query<E>>,
    {
        let parent = recorder::current_cx().unwrap_or_else(|| self.cx.clone());
        let query = Query::<E>::nested(&parent);

        match f(query).and_then(|query| query.compile()) {
            Ok(plan) => Predicate::record(stmt::ExprExists {
                subquery: Box::new(plan),
                negated,
            }),
            Err(err) => {
                recorder::record_error(err);
                Predicate::record(Expr::null())
            }
        }
    }
}
