mod group;
pub use group::{Group, GroupQuery};

mod page;
pub use page::{PagePlan, PageResult};

mod projected;
pub use projected::Projected;

mod projection;
pub use projection::{GroupKey, IntoGroupKeys, IntoProjection};

mod tables;
pub use tables::{JoinWith, Tables};

use crate::{
    compile,
    cx::QueryCx,
    db::Handle,
    recorder::{self, SinkKind},
    tracking::ActiveScope,
    Entity, Error, PredicateOutput, Result,
};

use entiq_core::stmt::{self, ExprColumn, JoinKind, Limit, OrderByExpr, SetOp, SetOperation, TableAlias};

use std::{future::Future, marker::PhantomData, rc::Rc, sync::Arc};

/// A query under construction.
///
/// `T` is the table set: an entity, or a tuple of entities after explicit
/// joins. Clause methods run their closure against the proxies of `T`,
/// record what the closure builds and return the first error raised while
/// doing so.
///
/// Queries hold their binding context in an `Rc` and are built on one
/// thread. Terminal operations compile the plan synchronously and return a
/// `Send` future.
pub struct Query<T: Tables> {
    pub(crate) cx: Rc<QueryCx>,
    db: Option<Handle>,

    /// Alias of each table of `T`, in tuple order
    tables: Vec<TableAlias>,

    pub(crate) state: QueryState,
    _p: PhantomData<T>,
}

/// Clause state accumulated by a query.
#[derive(Debug, Clone)]
pub(crate) struct QueryState {
    /// Recorded `where` statements, AND-combined at compile time
    pub(crate) filter: Vec<stmt::Expr>,
    pub(crate) order_by: Vec<OrderByExpr>,
    pub(crate) offset: Option<u64>,
    pub(crate) limit: Option<u64>,
    pub(crate) set_ops: Vec<SetOperation>,

    /// Overrides the base table name
    pub(crate) table_name: Option<String>,

    pub(crate) logical_delete: bool,
    pub(crate) tracking: bool,
}

/// Grouping keys and group filter of a grouped query.
#[derive(Debug, Clone)]
pub(crate) struct Grouping {
    pub(crate) keys: Vec<stmt::Expr>,
    pub(crate) having: Vec<stmt::Expr>,
}

/// A compiled plan ready to run.
pub(crate) struct Prepared {
    pub(crate) handle: Handle,
    pub(crate) plan: Arc<stmt::QueryPlan>,
    pub(crate) tracking: Option<ActiveScope>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            filter: vec![],
            order_by: vec![],
            offset: None,
            limit: None,
            set_ops: vec![],
            table_name: None,
            logical_delete: true,
            tracking: false,
        }
    }
}

impl QueryState {
    pub(crate) fn limit(&self) -> Option<Limit> {
        let limit = Limit::new(self.offset, self.limit);
        (!limit.is_empty()).then_some(limit)
    }
}

impl<E: Entity> Query<E> {
    pub(crate) fn root(handle: Handle) -> Query<E> {
        let cx = QueryCx::root(handle.schema().clone(), handle.query_options(), E::NAME);
        Query::from_parts(cx, Some(handle))
    }

    /// A subquery of the query whose context is `parent`. Columns of the
    /// enclosing query read inside it become correlated references.
    pub(crate) fn nested(parent: &Rc<QueryCx>) -> Query<E> {
        Query::from_parts(QueryCx::child(parent, E::NAME), None)
    }

    fn from_parts(cx: Rc<QueryCx>, db: Option<Handle>) -> Query<E> {
        Query {
            cx,
            db,
            tables: vec![TableAlias::BASE],
            state: QueryState::default(),
            _p: PhantomData,
        }
    }
}

impl<T: Tables> Query<T> {
    pub(crate) fn proxies(&self) -> T::Proxies {
        T::proxies(&self.cx, &self.tables)
    }

    /// Add a filter. Statements recorded by `f` are AND-combined, in
    /// statement order, with each other and with earlier filters.
    pub fn where_<F, R>(mut self, f: F) -> Result<Self>
    where
        F: FnOnce(&T::Proxies) -> R,
        R: PredicateOutput,
    {
        let proxies = self.proxies();
        let ((), sink) = recorder::run(&self.cx, SinkKind::predicates(), || f(&proxies).finish())?;
        self.state.filter.extend(sink.into_predicates());
        Ok(self)
    }

    /// Add a filter only when `condition` holds. `f` is not run otherwise.
    pub fn where_if<F, R>(self, condition: bool, f: F) -> Result<Self>
    where
        F: FnOnce(&T::Proxies) -> R,
        R: PredicateOutput,
    {
        if condition {
            self.where_(f)
        } else {
            Ok(self)
        }
    }

    /// Filter on the base table's primary key. Composite keys are passed as
    /// a record with one field per key column.
    pub fn where_by_id(mut self, id: impl Into<stmt::Value>) -> Result<Self> {
        let entity = self.cx.schema.resolve(<T::Base as Entity>::NAME)?;

        let values = match (entity.primary_key.as_slice(), id.into()) {
            ([_], id) => vec![id],
            (key, stmt::Value::Record(record)) if record.len() == key.len() => record.into_vec(),
            (key, id) => {
                return Err(Error::invalid_statement(format!(
                    "`{}` has a {}-column primary key; `where_by_id` received {:?}",
                    entity.name,
                    key.len(),
                    id
                )))
            }
        };

        let mut operands = Vec::with_capacity(values.len());

        for (&index, value) in entity.primary_key.iter().zip(values) {
            let column = &entity.columns[index];

            if !value.is_a(&column.ty) {
                return Err(Error::type_mismatch(
                    format!("{}.{}", entity.name, column.name),
                    column.ty.clone(),
                    value.infer_ty(),
                ));
            }

            operands.push(stmt::Expr::eq(ExprColumn::new(TableAlias::BASE, index), value));
        }

        self.state.filter.push(stmt::Expr::and_from_vec(operands));
        Ok(self)
    }

    /// Add ordering items. `f` calls `asc()` or `desc()` on what to order
    /// by; items are appended after earlier ones.
    pub fn order_by<F, R>(mut self, f: F) -> Result<Self>
    where
        F: FnOnce(&T::Proxies) -> R,
    {
        let proxies = self.proxies();
        let (_, sink) = recorder::run(&self.cx, SinkKind::order(), || f(&proxies))?;
        self.state.order_by.extend(sink.into_order());
        Ok(self)
    }

    pub fn left_join<N, F, R>(self, on: F) -> Result<Query<T::Output>>
    where
        N: Entity,
        T: JoinWith<N>,
        F: FnOnce(&<T::Output as Tables>::Proxies) -> R,
        R: PredicateOutput,
    {
        self.join::<N, F, R>(JoinKind::Left, None, on)
    }

    pub fn inner_join<N, F, R>(self, on: F) -> Result<Query<T::Output>>
    where
        N: Entity,
        T: JoinWith<N>,
        F: FnOnce(&<T::Output as Tables>::Proxies) -> R,
        R: PredicateOutput,
    {
        self.join::<N, F, R>(JoinKind::Inner, None, on)
    }

    pub fn right_join<N, F, R>(self, on: F) -> Result<Query<T::Output>>
    where
        N: Entity,
        T: JoinWith<N>,
        F: FnOnce(&<T::Output as Tables>::Proxies) -> R,
        R: PredicateOutput,
    {
        self.join::<N, F, R>(JoinKind::Right, None, on)
    }

    /// Join the rows of `source` as if they were the table of `N`.
    pub fn left_join_query<N, F, R>(self, source: Query<N>, on: F) -> Result<Query<T::Output>>
    where
        N: Entity,
        T: JoinWith<N>,
        F: FnOnce(&<T::Output as Tables>::Proxies) -> R,
        R: PredicateOutput,
    {
        self.join::<N, F, R>(JoinKind::Left, Some(source), on)
    }

    /// Join the rows of `source` as if they were the table of `N`.
    pub fn inner_join_query<N, F, R>(self, source: Query<N>, on: F) -> Result<Query<T::Output>>
    where
        N: Entity,
        T: JoinWith<N>,
        F: FnOnce(&<T::Output as Tables>::Proxies) -> R,
        R: PredicateOutput,
    {
        self.join::<N, F, R>(JoinKind::Inner, Some(source), on)
    }

    /// Join the rows of `source` as if they were the table of `N`.
    pub fn right_join_query<N, F, R>(self, source: Query<N>, on: F) -> Result<Query<T::Output>>
    where
        N: Entity,
        T: JoinWith<N>,
        F: FnOnce(&<T::Output as Tables>::Proxies) -> R,
        R: PredicateOutput,
    {
        self.join::<N, F, R>(JoinKind::Right, Some(source), on)
    }

    fn join<N, F, R>(self, kind: JoinKind, source: Option<Query<N>>, on: F) -> Result<Query<T::Output>>
    where
        N: Entity,
        T: JoinWith<N>,
        F: FnOnce(&<T::Output as Tables>::Proxies) -> R,
        R: PredicateOutput,
    {
        let subquery = source.map(|source| source.compile()).transpose()?;

        let alias = self.cx.begin_explicit_join(kind, N::NAME, subquery)?;

        let mut tables = self.tables;
        tables.push(alias);

        let proxies = <T::Output as Tables>::proxies(&self.cx, &tables);
        let ((), sink) = recorder::run(&self.cx, SinkKind::predicates(), || on(&proxies).finish())?;
        self.cx
            .complete_join(alias, stmt::Expr::and_from_vec(sink.into_predicates()));

        Ok(Query {
            cx: self.cx,
            db: self.db,
            tables,
            state: self.state,
            _p: PhantomData,
        })
    }

    /// Read from `table_name` instead of the base entity's table.
    pub fn as_table(mut self, table_name: impl Into<String>) -> Self {
        self.state.table_name = Some(table_name.into());
        self
    }

    /// Snapshot every entity this query loads. Running the query fails with
    /// `TrackingNotActive` outside of a tracking scope.
    pub fn as_tracking(mut self) -> Self {
        self.state.tracking = true;
        self
    }

    /// Do not add logical-delete predicates for this query.
    pub fn disable_logical_delete(mut self) -> Self {
        self.state.logical_delete = false;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.state.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.state.offset = Some(offset);
        self
    }

    /// `UNION` with another query over the same tables.
    pub fn union(self, other: Query<T>) -> Result<Self> {
        self.set_op(SetOp::Union, other)
    }

    /// `UNION ALL` with another query over the same tables.
    pub fn union_all(self, other: Query<T>) -> Result<Self> {
        self.set_op(SetOp::UnionAll, other)
    }

    fn set_op(mut self, op: SetOp, other: Query<T>) -> Result<Self> {
        let lhs = self.compile()?;
        let rhs = other.compile()?;
        compile::check_union(&lhs, &rhs)?;

        self.state.set_ops.push(SetOperation { op, query: rhs });
        Ok(self)
    }

    /// Project the query. The closure returns the projected items.
    pub fn select<F, P>(self, f: F) -> Result<Projected>
    where
        F: FnOnce(&T::Proxies) -> P,
        P: IntoProjection,
    {
        let proxies = self.proxies();
        let (items, _) = recorder::run(&self.cx, SinkKind::Value, || f(&proxies).into_projection())?;
        Projected::new(self, stmt::Projection::new(items), None)
    }

    /// Group the query. The closure returns the grouping keys.
    pub fn group_by<F, G>(self, f: F) -> Result<GroupQuery<T, G::Keys>>
    where
        F: FnOnce(&T::Proxies) -> G,
        G: IntoGroupKeys,
    {
        let proxies = self.proxies();
        let (keys, _) = recorder::run(&self.cx, SinkKind::Value, || f(&proxies).into_group_keys())?;
        Ok(GroupQuery::new(self, keys))
    }

    /// Compile the query into a plan projecting every base column.
    pub fn compile(&self) -> Result<stmt::QueryPlan> {
        compile::compile(&self.cx, &self.state, None, None)
    }

    /// The count plan and the data plan of page `page_index` (from 1).
    pub fn compile_page(&self, page_index: i64, page_size: i64) -> Result<PagePlan> {
        PagePlan::compile(&self.cx, &self.state, page_index, page_size)
    }

    pub(crate) fn handle(&self) -> Result<Handle> {
        self.db
            .clone()
            .ok_or_else(|| Error::invalid_statement("subqueries cannot be executed on their own"))
    }

    fn prepare(&self, f: impl FnOnce(&mut QueryState)) -> Result<Prepared> {
        let handle = self.handle()?;
        let tracking = self.tracking_scope(&handle)?;

        let mut state = self.state.clone();
        f(&mut state);

        Ok(Prepared {
            handle,
            plan: Arc::new(compile::compile(&self.cx, &state, None, None)?),
            tracking,
        })
    }

    /// The scope rows of an `as_tracking` query are captured into.
    fn tracking_scope(&self, handle: &Handle) -> Result<Option<ActiveScope>> {
        if !self.state.tracking {
            return Ok(None);
        }

        handle.tracker().require_active("as_tracking").map(Some)
    }

    fn prepare_count(&self) -> Result<Prepared> {
        let handle = self.handle()?;
        let plan = compile::compile_count(&self.cx, &self.state)?;

        Ok(Prepared {
            handle,
            plan: Arc::new(plan),
            tracking: None,
        })
    }

    /// Load every matching row as the base entity.
    pub fn to_list(&self) -> impl Future<Output = Result<Vec<T::Base>>> + Send + 'static {
        let prepared = self.prepare(|_| {});

        async move {
            let prepared = prepared?;
            prepared.handle.load_all::<T::Base>(prepared.plan, prepared.tracking).await
        }
    }

    /// The first matching row, if any.
    pub fn first_or_null(&self) -> impl Future<Output = Result<Option<T::Base>>> + Send + 'static {
        let prepared = self.prepare(|state| state.limit = Some(1));

        async move {
            let prepared = prepared?;
            let rows = prepared.handle.load_all::<T::Base>(prepared.plan, prepared.tracking).await?;
            Ok(rows.into_iter().next())
        }
    }

    /// The first matching row. Fails with `EntityNotFound` if there is none.
    pub fn first_not_null(&self) -> impl Future<Output = Result<T::Base>> + Send + 'static {
        let first = self.first_or_null();
        async move { first.await?.ok_or_else(|| Error::entity_not_found(None::<String>)) }
    }

    /// Like [`first_not_null`](Query::first_not_null), reporting `message`.
    pub fn first_not_null_with(
        &self,
        message: impl Into<String>,
    ) -> impl Future<Output = Result<T::Base>> + Send + 'static {
        let first = self.first_or_null();
        let message = message.into();
        async move { first.await?.ok_or_else(|| Error::entity_not_found(Some(message))) }
    }

    /// Number of matching rows. Ordering and pagination are ignored.
    pub fn count(&self) -> impl Future<Output = Result<u64>> + Send + 'static {
        let prepared = self.prepare_count();

        async move {
            let prepared = prepared?;
            prepared.handle.fetch_count(prepared.plan).await
        }
    }

    /// Whether any row matches.
    pub fn any(&self) -> impl Future<Output = Result<bool>> + Send + 'static {
        let count = self.count();
        async move { Ok(count.await? > 0) }
    }

    /// Run the count plan and the data plan of one page. The data plan is
    /// skipped when the count is zero.
    pub fn to_page_result(
        &self,
        page_index: i64,
        page_size: i64,
    ) -> impl Future<Output = Result<PageResult<T::Base>>> + Send + 'static {
        let prepared = self.handle().and_then(|handle| {
            let tracking = self.tracking_scope(&handle)?;
            let plan = self.compile_page(page_index, page_size)?;
            Ok((handle, plan, tracking))
        });

        async move {
            let (handle, plan, tracking) = prepared?;
            let size = plan.page_size;

            let total = handle.fetch_count(Arc::new(plan.count)).await?;
            if total == 0 {
                return Ok(PageResult::new(0, vec![]));
            }

            let mut items = handle.load_all::<T::Base>(Arc::new(plan.data), tracking).await?;
            items.truncate(size);
            Ok(PageResult::new(total, items))
        }
    }
}
