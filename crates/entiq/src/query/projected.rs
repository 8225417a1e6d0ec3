use super::{Grouping, Query, QueryState, Tables};
use crate::{compile, cx::QueryCx, db::Handle, Entity, Error, Result};

use entiq_core::{
    schema,
    stmt::{self, Expr, Projection, Record, SetOp, SetOperation, TableAlias, Type, Value},
};

use std::{future::Future, rc::Rc, sync::Arc};

/// A query with an explicit projection. Rows are returned as records with
/// one field per projected item.
pub struct Projected {
    cx: Rc<QueryCx>,
    db: Option<Handle>,
    state: QueryState,
    projection: Projection,
    grouping: Option<Grouping>,
}

impl Projected {
    /// Build a projected query and check it compiles, so projection and
    /// grouping errors surface from `select`.
    pub(super) fn new<T: Tables>(
        query: Query<T>,
        projection: Projection,
        grouping: Option<Grouping>,
    ) -> Result<Projected> {
        let db = query.handle().ok();

        let projected = Projected {
            cx: query.cx,
            db,
            state: query.state,
            projection,
            grouping,
        };

        projected.compile()?;
        Ok(projected)
    }

    pub fn compile(&self) -> Result<stmt::QueryPlan> {
        compile::compile(
            &self.cx,
            &self.state,
            Some(self.projection.clone()),
            self.grouping.as_ref(),
        )
    }

    /// Types of the projected items, in order.
    pub fn shape(&self) -> Vec<Type> {
        self.projection.shape()
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.state.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.state.offset = Some(offset);
        self
    }

    /// `UNION` with another projection of the same shape.
    pub fn union(self, other: Projected) -> Result<Self> {
        self.set_op(SetOp::Union, other)
    }

    /// `UNION ALL` with another projection of the same shape.
    pub fn union_all(self, other: Projected) -> Result<Self> {
        self.set_op(SetOp::UnionAll, other)
    }

    fn set_op(mut self, op: SetOp, other: Projected) -> Result<Self> {
        let lhs = self.compile()?;
        let rhs = other.compile()?;
        compile::check_union(&lhs, &rhs)?;

        self.state.set_ops.push(SetOperation { op, query: rhs });
        Ok(self)
    }

    fn prepare(&self) -> Result<(Handle, Arc<stmt::QueryPlan>)> {
        let handle = self
            .db
            .clone()
            .ok_or_else(|| Error::invalid_statement("subqueries cannot be executed on their own"))?;

        Ok((handle, Arc::new(self.compile()?)))
    }

    /// Every row as a record.
    pub fn to_list(&self) -> impl Future<Output = Result<Vec<stmt::Record>>> + Send + 'static {
        let prepared = self.prepare();

        async move {
            let (handle, plan) = prepared?;
            handle.fetch_records(plan).await
        }
    }

    /// Every row loaded as `E`. The projection either matches the columns of
    /// `E` in number, order and type, or is made of distinct columns of the
    /// base table of `E`. Columns left out take [`fill_value`].
    ///
    /// [`fill_value`]: entiq_core::schema::Column::fill_value
    pub fn to_entities<E: Entity>(&self) -> impl Future<Output = Result<Vec<E>>> + Send + 'static {
        let prepared = self.prepare().and_then(|(handle, plan)| {
            let layout = EntityLayout::new(handle.schema().resolve(E::NAME)?, &plan)?;
            Ok((handle, plan, layout))
        });

        async move {
            let (handle, plan, layout) = prepared?;

            match layout {
                None => handle.load_all::<E>(plan, None).await,
                Some(layout) => {
                    let records = handle
                        .fetch_records(plan)
                        .await?
                        .into_iter()
                        .map(|record| layout.widen(record))
                        .collect::<Result<Vec<_>>>()?;

                    handle.load_records::<E>(records, None)
                }
            }
        }
    }
}

/// Where each column of an entity comes from when a projection only names
/// some of them.
#[derive(Debug)]
struct EntityLayout {
    slots: Vec<Slot>,
    width: usize,
}

#[derive(Debug)]
enum Slot {
    Projected(usize),
    Filled(Value),
}

impl EntityLayout {
    /// `None` when rows already have the entity's shape.
    fn new(entity: &schema::Entity, plan: &stmt::QueryPlan) -> Result<Option<EntityLayout>> {
        let expected = entity.shape();
        let actual = plan.projection.shape();

        if expected.len() == actual.len()
            && expected.iter().zip(&actual).all(|(lhs, rhs)| lhs.accepts(rhs))
        {
            return Ok(None);
        }

        let invalid = || {
            Error::invalid_projection(format!(
                "projection {actual:?} cannot be loaded as `{}` ({expected:?})",
                entity.name
            ))
        };

        if plan.source.entity != entity.name {
            return Err(invalid());
        }

        let mut sources = vec![None; entity.columns.len()];

        for (position, item) in plan.projection.items.iter().enumerate() {
            let Expr::Column(column) = &item.expr else {
                return Err(invalid());
            };

            if column.nesting != 0 || column.table != TableAlias::BASE {
                return Err(invalid());
            }

            let Some(slot) = sources.get_mut(column.column) else {
                return Err(invalid());
            };

            if slot.is_some() || !entity.columns[column.column].ty.accepts(&item.ty) {
                return Err(invalid());
            }

            *slot = Some(position);
        }

        let slots = sources
            .into_iter()
            .zip(&entity.columns)
            .map(|(source, column)| match source {
                Some(position) => Slot::Projected(position),
                None => Slot::Filled(column.fill_value()),
            })
            .collect();

        Ok(Some(EntityLayout {
            slots,
            width: actual.len(),
        }))
    }

    fn widen(&self, record: Record) -> Result<Record> {
        if record.len() != self.width {
            return Err(Error::driver_response(format!(
                "expected {} projected columns, driver returned {}",
                self.width,
                record.len()
            )));
        }

        let mut fields: Vec<Option<Value>> = record.into_vec().into_iter().map(Some).collect();

        let values = self
            .slots
            .iter()
            .map(|slot| match slot {
                Slot::Projected(position) => fields[*position].take().unwrap_or_default(),
                Slot::Filled(value) => value.clone(),
            })
            .collect();

        Ok(Record::from_vec(values))
    }
}
