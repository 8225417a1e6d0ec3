use crate::{Error, Result};

use entiq_core::{
    schema::Relation,
    stmt::{Expr, ExprColumn, Join, JoinKind, JoinOrigin, NavPath, QueryPlan, TableAlias},
    Schema,
};
use indexmap::IndexMap;

use std::{
    cell::RefCell,
    rc::Rc,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

/// Settings shared by every query built from one `Db`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct QueryOptions {
    pub(crate) implicit_join_kind: JoinKind,
    pub(crate) logical_delete: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            implicit_join_kind: JoinKind::Left,
            logical_delete: true,
        }
    }
}

/// The binding state of one query under construction.
///
/// Proxy handles keep an `Rc` to the context of the query that bound them.
/// A nested query's context points at the enclosing query's context, which
/// is how correlated column references find their nesting level.
pub struct QueryCx {
    id: usize,
    pub(crate) schema: Arc<Schema>,
    pub(crate) options: QueryOptions,
    pub(crate) parent: Option<Rc<QueryCx>>,
    state: RefCell<CxState>,
}

#[derive(Default)]
struct CxState {
    /// Entity bound to each alias; the alias is the index.
    tables: Vec<String>,

    /// Explicit and implicit joins, in first-reference order
    joins: Vec<Join>,

    /// Implicit joins by access path
    implicit: IndexMap<NavPath, TableAlias>,
}

/// An alias together with the entity it is bound to and the path that
/// produced it.
#[derive(Debug, Clone)]
pub(crate) struct Binding {
    pub(crate) alias: TableAlias,
    pub(crate) entity: String,
    pub(crate) path: NavPath,
}

impl QueryCx {
    pub(crate) fn root(schema: Arc<Schema>, options: QueryOptions, entity: &str) -> Rc<QueryCx> {
        Rc::new(QueryCx::new(schema, options, None, entity))
    }

    pub(crate) fn child(parent: &Rc<QueryCx>, entity: &str) -> Rc<QueryCx> {
        Rc::new(QueryCx::new(
            parent.schema.clone(),
            parent.options,
            Some(parent.clone()),
            entity,
        ))
    }

    fn new(
        schema: Arc<Schema>,
        options: QueryOptions,
        parent: Option<Rc<QueryCx>>,
        entity: &str,
    ) -> QueryCx {
        static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

        QueryCx {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            schema,
            options,
            parent,
            state: RefCell::new(CxState {
                tables: vec![entity.to_string()],
                ..CxState::default()
            }),
        }
    }

    pub(crate) fn id(&self) -> usize {
        self.id
    }

    pub(crate) fn is_nested(&self) -> bool {
        self.parent.is_some()
    }

    /// Number of scopes between `self` and the context with `id`, walking
    /// outwards. `None` if `id` does not enclose `self`.
    pub(crate) fn distance_to(self: &Rc<Self>, id: usize) -> Option<usize> {
        let mut nesting = 0;
        let mut cx = Some(self);

        while let Some(current) = cx {
            if current.id == id {
                return Some(nesting);
            }
            nesting += 1;
            cx = current.parent.as_ref();
        }

        None
    }

    pub(crate) fn base_entity(&self) -> String {
        self.state.borrow().tables[0].clone()
    }

    pub(crate) fn binding(&self, alias: TableAlias) -> Option<Binding> {
        let state = self.state.borrow();
        let entity = state.tables.get(alias.index())?.clone();
        let path = state
            .implicit
            .iter()
            .find(|(_, a)| **a == alias)
            .map(|(path, _)| path.clone())
            .unwrap_or_else(|| NavPath::root(alias));

        Some(Binding {
            alias,
            entity,
            path,
        })
    }

    pub(crate) fn joins(&self) -> Vec<Join> {
        self.state.borrow().joins.clone()
    }

    /// Allocate the alias for an explicit join. The join condition is set
    /// with [`QueryCx::complete_join`] once the `on` closure has run, so that
    /// implicit joins it creates are ordered after it. With `subquery` the
    /// alias reads the rows of that plan instead of the entity's table.
    pub(crate) fn begin_explicit_join(
        &self,
        kind: JoinKind,
        entity: &str,
        subquery: Option<QueryPlan>,
    ) -> Result<TableAlias> {
        let table_name = self.schema.resolve(entity)?.table_name.clone();
        let mut state = self.state.borrow_mut();

        let alias = state.push_join(Join {
            kind,
            alias: TableAlias(0),
            entity: entity.to_string(),
            table_name,
            on: Expr::from(true),
            origin: JoinOrigin::Explicit,
            subquery: subquery.map(Box::new),
        });

        Ok(alias)
    }

    pub(crate) fn complete_join(&self, alias: TableAlias, on: Expr) {
        let mut state = self.state.borrow_mut();

        if let Some(join) = state.joins.iter_mut().find(|join| join.alias == alias) {
            join.on = on;
        }
    }

    /// Resolve a navigation read from `from`, reusing the implicit join for
    /// an identical access path or appending new joins.
    pub(crate) fn navigate(&self, from: &Binding, name: &str) -> Result<Binding> {
        let entity = self.schema.resolve(&from.entity)?;
        let navigation = entity.resolve_navigation(name)?;
        let path = from.path.child(name);

        if let Some(alias) = self.state.borrow().implicit.get(&path).copied() {
            tracing::debug!(%path, %alias, "reusing implicit join");
            return Ok(Binding {
                alias,
                entity: navigation.target.clone(),
                path,
            });
        }

        let target = self.schema.resolve(&navigation.target)?;
        let (self_column, _) = entity.resolve_column(&navigation.self_property)?;
        let (target_column, _) = target.resolve_column(&navigation.target_property)?;
        let kind = self.options.implicit_join_kind;

        let mut state = self.state.borrow_mut();

        let alias = match &navigation.relation {
            Relation::ManyToMany(many_to_many) => {
                let mapping = self.schema.resolve(&many_to_many.mapping)?;
                let (mapping_self, _) =
                    mapping.resolve_column(&many_to_many.self_mapping_property)?;
                let (mapping_target, _) =
                    mapping.resolve_column(&many_to_many.target_mapping_property)?;

                let mapping_path = path.child(NavPath::MAPPING);
                let mapping_alias = state.next_alias();
                state.push_implicit(
                    mapping_path,
                    Join {
                        kind,
                        alias: mapping_alias,
                        entity: mapping.name.clone(),
                        table_name: mapping.table_name.clone(),
                        on: Expr::eq(
                            ExprColumn::new(from.alias, self_column),
                            ExprColumn::new(mapping_alias, mapping_self),
                        ),
                        origin: JoinOrigin::Explicit,
                        subquery: None,
                    },
                );

                let target_alias = state.next_alias();
                state.push_implicit(
                    path.clone(),
                    Join {
                        kind,
                        alias: target_alias,
                        entity: target.name.clone(),
                        table_name: target.table_name.clone(),
                        on: Expr::eq(
                            ExprColumn::new(mapping_alias, mapping_target),
                            ExprColumn::new(target_alias, target_column),
                        ),
                        origin: JoinOrigin::Explicit,
                        subquery: None,
                    },
                )
            }
            Relation::OneToOne | Relation::OneToMany | Relation::ManyToOne => {
                let target_alias = state.next_alias();
                state.push_implicit(
                    path.clone(),
                    Join {
                        kind,
                        alias: target_alias,
                        entity: target.name.clone(),
                        table_name: target.table_name.clone(),
                        on: Expr::eq(
                            ExprColumn::new(from.alias, self_column),
                            ExprColumn::new(target_alias, target_column),
                        ),
                        origin: JoinOrigin::Explicit,
                        subquery: None,
                    },
                )
            }
        };

        tracing::debug!(%path, %alias, target = %target.name, "created implicit join");

        Ok(Binding {
            alias,
            entity: target.name.clone(),
            path,
        })
    }

    /// Checks that `alias` is bound in this context.
    pub(crate) fn check_alias(&self, alias: TableAlias) -> Result<()> {
        if alias.index() < self.state.borrow().tables.len() {
            Ok(())
        } else {
            Err(Error::invalid_statement(format!(
                "table alias {alias} is not part of the query"
            )))
        }
    }
}

impl CxState {
    fn next_alias(&self) -> TableAlias {
        TableAlias(self.tables.len())
    }

    fn push_join(&mut self, mut join: Join) -> TableAlias {
        let alias = self.next_alias();
        join.alias = alias;
        self.tables.push(join.entity.clone());
        self.joins.push(join);
        alias
    }

    fn push_implicit(&mut self, path: NavPath, mut join: Join) -> TableAlias {
        join.origin = JoinOrigin::Implicit(path.clone());
        let alias = self.push_join(join);
        self.implicit.insert(path, alias);
        alias
    }
}
