//! Assembles the recorded state of a query into a [`QueryPlan`].

use crate::{
    cx::QueryCx,
    query::{Grouping, QueryState},
    Error, Result,
};

use entiq_core::stmt::{
    visit, Expr, ExprColumn, Projection, ProjectionItem, QueryPlan, Source, TableAlias,
    Type, Visit,
};

/// Compile a query. Without an explicit `projection` every column of the
/// base table is projected.
pub(crate) fn compile(
    cx: &QueryCx,
    state: &QueryState,
    projection: Option<Projection>,
    grouping: Option<&Grouping>,
) -> Result<QueryPlan> {
    let entity = cx.schema.resolve(&cx.base_entity())?;
    let logical_delete = cx.options.logical_delete && state.logical_delete;

    let projection = match projection {
        Some(projection) if projection.is_empty() => {
            return Err(Error::invalid_projection("a projection needs at least one item"));
        }
        Some(projection) => projection,
        None => Projection::new(
            entity
                .columns
                .iter()
                .enumerate()
                .map(|(index, column)| ProjectionItem {
                    expr: Expr::column(ExprColumn::new(TableAlias::BASE, index)),
                    ty: column.ty.clone(),
                })
                .collect(),
        ),
    };

    let source = Source {
        entity: entity.name.clone(),
        table_name: state
            .table_name
            .clone()
            .unwrap_or_else(|| entity.table_name.clone()),
        alias: TableAlias::BASE,
    };

    let mut plan = QueryPlan::new(source, projection);

    plan.joins = cx.joins();

    if logical_delete {
        // Nested sources apply their own logical-delete filter.
        for join in plan.joins.iter_mut().filter(|join| !join.is_subquery()) {
            let target = cx.schema.resolve(&join.entity)?;

            if let Some(predicate) = target.logical_delete_predicate(join.alias) {
                join.on = Expr::and(join.on.take(), predicate);
            }
        }
    }

    let mut filter = state.filter.clone();
    if logical_delete {
        filter.extend(entity.logical_delete_predicate(TableAlias::BASE));
    }
    plan.filter = Some(Expr::and_from_vec(filter)).filter(|filter| !filter.is_true());

    if let Some(grouping) = grouping {
        plan.group_by = grouping.keys.clone();
        plan.having = Some(Expr::and_from_vec(grouping.having.clone())).filter(|having| !having.is_true());
    }

    plan.order_by = state.order_by.clone();
    plan.limit = state.limit();

    check_aliases(&plan)?;
    check_grouping(&plan)?;

    plan.set_ops = state.set_ops.clone();

    tracing::debug!(
        entity = %plan.source.entity,
        joins = plan.joins.len(),
        nested = cx.is_nested(),
        "compiled query plan"
    );

    Ok(plan)
}

/// The plan counting the rows of a query: same source, joins and filter,
/// projecting `count(*)`.
pub(crate) fn compile_count(cx: &QueryCx, state: &QueryState) -> Result<QueryPlan> {
    if !state.set_ops.is_empty() {
        return Err(Error::invalid_statement(
            "counting a query combined with `union` is not supported",
        ));
    }

    let mut state = state.clone();
    state.order_by.clear();
    state.offset = None;
    state.limit = None;

    compile(
        cx,
        &state,
        Some(Projection::single(Expr::count_star(), Type::I64)),
        None,
    )
}

/// Both sides of a set operation must project the same shape.
pub(crate) fn check_union(lhs: &QueryPlan, rhs: &QueryPlan) -> Result<()> {
    if lhs.projection.is_compatible_with(&rhs.projection) {
        Ok(())
    } else {
        Err(Error::incompatible_union(lhs.shape(), rhs.shape()))
    }
}

/// Every column read at the plan's own level must belong to one of its
/// tables. Columns of subqueries are checked relative to their depth;
/// correlated references into enclosing queries are skipped.
fn check_aliases(plan: &QueryPlan) -> Result<()> {
    struct CheckAliases<'a> {
        plan: &'a QueryPlan,
        depth: usize,
        missing: Option<TableAlias>,
    }

    impl Visit for CheckAliases<'_> {
        fn visit_expr_column(&mut self, i: &ExprColumn) {
            if i.nesting == self.depth && !self.plan.contains_alias(i.table) {
                self.missing.get_or_insert(i.table);
            }
        }

        fn visit_query_plan(&mut self, i: &QueryPlan) {
            self.depth += 1;
            visit::visit_query_plan(self, i);
            self.depth -= 1;
        }
    }

    let mut check = CheckAliases {
        plan,
        depth: 0,
        missing: None,
    };

    for join in &plan.joins {
        check.visit_join(join);
    }

    if let Some(filter) = &plan.filter {
        check.visit_expr(filter);
    }

    check.visit_projection(&plan.projection);

    for key in &plan.group_by {
        check.visit_expr(key);
    }

    if let Some(having) = &plan.having {
        check.visit_expr(having);
    }

    for order_by in &plan.order_by {
        check.visit_order_by_expr(order_by);
    }

    match check.missing {
        Some(alias) => Err(Error::invalid_statement(format!(
            "table alias {alias} is not part of the query on `{}`",
            plan.source.entity
        ))),
        None => Ok(()),
    }
}

/// With grouping keys, each projected item must be a key, a constant, an
/// aggregate, or composed only of those.
fn check_grouping(plan: &QueryPlan) -> Result<()> {
    if !plan.is_grouped() {
        return Ok(());
    }

    for (position, item) in plan.projection.items.iter().enumerate() {
        if !is_grouped_expr(&item.expr, &plan.group_by) {
            return Err(Error::invalid_projection(format!(
                "projection item {position} of the grouped query on `{}` is neither a grouping key nor an aggregate",
                plan.source.entity
            )));
        }
    }

    Ok(())
}

fn is_grouped_expr(expr: &Expr, keys: &[Expr]) -> bool {
    if keys.contains(expr) {
        return true;
    }

    match expr {
        Expr::Aggregate(_) | Expr::Value(_) | Expr::Exists(_) => true,
        Expr::Column(_) => false,
        Expr::And(e) => e.operands.iter().all(|operand| is_grouped_expr(operand, keys)),
        Expr::Or(e) => e.operands.iter().all(|operand| is_grouped_expr(operand, keys)),
        Expr::Not(e) => is_grouped_expr(&e.expr, keys),
        Expr::BinaryOp(e) => is_grouped_expr(&e.lhs, keys) && is_grouped_expr(&e.rhs, keys),
        Expr::Case(e) => {
            e.branches
                .iter()
                .all(|branch| is_grouped_expr(&branch.when, keys) && is_grouped_expr(&branch.then, keys))
                && is_grouped_expr(&e.otherwise, keys)
        }
        Expr::InList(e) => {
            is_grouped_expr(&e.expr, keys) && e.list.iter().all(|item| is_grouped_expr(item, keys))
        }
        Expr::InSubquery(e) => is_grouped_expr(&e.expr, keys),
        Expr::IsNull(e) => is_grouped_expr(&e.expr, keys),
        Expr::Like(e) => is_grouped_expr(&e.expr, keys),
    }
}
