#![allow(unused_variables)]

use super::{
    Expr, ExprAggregate, ExprAnd, ExprBinaryOp, ExprCase, ExprColumn, ExprExists, ExprInList,
    ExprInSubquery, ExprIsNull, ExprLike, ExprNot, ExprOr, Join, OrderByExpr, Projection,
    QueryPlan, Value,
};

pub trait Visit {
    fn visit_expr(&mut self, i: &Expr) {
        visit_expr(self, i);
    }

    fn visit_expr_aggregate(&mut self, i: &ExprAggregate) {
        visit_expr_aggregate(self, i);
    }

    fn visit_expr_and(&mut self, i: &ExprAnd) {
        visit_expr_and(self, i);
    }

    fn visit_expr_binary_op(&mut self, i: &ExprBinaryOp) {
        visit_expr_binary_op(self, i);
    }

    fn visit_expr_case(&mut self, i: &ExprCase) {
        visit_expr_case(self, i);
    }

    fn visit_expr_column(&mut self, i: &ExprColumn) {
        visit_expr_column(self, i);
    }

    fn visit_expr_exists(&mut self, i: &ExprExists) {
        visit_expr_exists(self, i);
    }

    fn visit_expr_in_list(&mut self, i: &ExprInList) {
        visit_expr_in_list(self, i);
    }

    fn visit_expr_in_subquery(&mut self, i: &ExprInSubquery) {
        visit_expr_in_subquery(self, i);
    }

    fn visit_expr_is_null(&mut self, i: &ExprIsNull) {
        visit_expr_is_null(self, i);
    }

    fn visit_expr_like(&mut self, i: &ExprLike) {
        visit_expr_like(self, i);
    }

    fn visit_expr_not(&mut self, i: &ExprNot) {
        visit_expr_not(self, i);
    }

    fn visit_expr_or(&mut self, i: &ExprOr) {
        visit_expr_or(self, i);
    }

    fn visit_join(&mut self, i: &Join) {
        visit_join(self, i);
    }

    fn visit_order_by_expr(&mut self, i: &OrderByExpr) {
        visit_order_by_expr(self, i);
    }

    fn visit_projection(&mut self, i: &Projection) {
        visit_projection(self, i);
    }

    fn visit_query_plan(&mut self, i: &QueryPlan) {
        visit_query_plan(self, i);
    }

    fn visit_value(&mut self, i: &Value) {
        visit_value(self, i);
    }
}

impl<V: Visit + ?Sized> Visit for &mut V {
    fn visit_expr(&mut self, i: &Expr) {
        Visit::visit_expr(&mut **self, i);
    }

    fn visit_expr_aggregate(&mut self, i: &ExprAggregate) {
        Visit::visit_expr_aggregate(&mut **self, i);
    }

    fn visit_expr_and(&mut self, i: &ExprAnd) {
        Visit::visit_expr_and(&mut **self, i);
    }

    fn visit_expr_binary_op(&mut self, i: &ExprBinaryOp) {
        Visit::visit_expr_binary_op(&mut **self, i);
    }

    fn visit_expr_case(&mut self, i: &ExprCase) {
        Visit::visit_expr_case(&mut **self, i);
    }

    fn visit_expr_column(&mut self, i: &ExprColumn) {
        Visit::visit_expr_column(&mut **self, i);
    }

    fn visit_expr_exists(&mut self, i: &ExprExists) {
        Visit::visit_expr_exists(&mut **self, i);
    }

    fn visit_expr_in_list(&mut self, i: &ExprInList) {
        Visit::visit_expr_in_list(&mut **self, i);
    }

    fn visit_expr_in_subquery(&mut self, i: &ExprInSubquery) {
        Visit::visit_expr_in_subquery(&mut **self, i);
    }

    fn visit_expr_is_null(&mut self, i: &ExprIsNull) {
        Visit::visit_expr_is_null(&mut **self, i);
    }

    fn visit_expr_like(&mut self, i: &ExprLike) {
        Visit::visit_expr_like(&mut **self, i);
    }

    fn visit_expr_not(&mut self, i: &ExprNot) {
        Visit::visit_expr_not(&mut **self, i);
    }

    fn visit_expr_or(&mut self, i: &ExprOr) {
        Visit::visit_expr_or(&mut **self, i);
    }

    fn visit_join(&mut self, i: &Join) {
        Visit::visit_join(&mut **self, i);
    }

    fn visit_order_by_expr(&mut self, i: &OrderByExpr) {
        Visit::visit_order_by_expr(&mut **self, i);
    }

    fn visit_projection(&mut self, i: &Projection) {
        Visit::visit_projection(&mut **self, i);
    }

    fn visit_query_plan(&mut self, i: &QueryPlan) {
        Visit::visit_query_plan(&mut **self, i);
    }

    fn visit_value(&mut self, i: &Value) {
        Visit::visit_value(&mut **self, i);
    }
}

pub fn visit_expr<V>(v: &mut V, node: &Expr)
where
    V: Visit + ?Sized,
{
    match node {
        Expr::Aggregate(expr) => v.visit_expr_aggregate(expr),
        Expr::And(expr) => v.visit_expr_and(expr),
        Expr::BinaryOp(expr) => v.visit_expr_binary_op(expr),
        Expr::Case(expr) => v.visit_expr_case(expr),
        Expr::Column(expr) => v.visit_expr_column(expr),
        Expr::Exists(expr) => v.visit_expr_exists(expr),
        Expr::InList(expr) => v.visit_expr_in_list(expr),
        Expr::InSubquery(expr) => v.visit_expr_in_subquery(expr),
        Expr::IsNull(expr) => v.visit_expr_is_null(expr),
        Expr::Like(expr) => v.visit_expr_like(expr),
        Expr::Not(expr) => v.visit_expr_not(expr),
        Expr::Or(expr) => v.visit_expr_or(expr),
        Expr::Value(expr) => v.visit_value(expr),
    }
}

pub fn visit_expr_aggregate<V>(v: &mut V, node: &ExprAggregate)
where
    V: Visit + ?Sized,
{
    if let Some(arg) = &node.arg {
        v.visit_expr(arg);
    }
}

pub fn visit_expr_and<V>(v: &mut V, node: &ExprAnd)
where
    V: Visit + ?Sized,
{
    for expr in node {
        v.visit_expr(expr);
    }
}

pub fn visit_expr_binary_op<V>(v: &mut V, node: &ExprBinaryOp)
where
    V: Visit + ?Sized,
{
    v.visit_expr(&node.lhs);
    v.visit_expr(&node.rhs);
}

pub fn visit_expr_case<V>(v: &mut V, node: &ExprCase)
where
    V: Visit + ?Sized,
{
    for branch in &node.branches {
        v.visit_expr(&branch.when);
        v.visit_expr(&branch.then);
    }
    v.visit_expr(&node.otherwise);
}

pub fn visit_expr_column<V>(v: &mut V, node: &ExprColumn)
where
    V: Visit + ?Sized,
{
}

pub fn visit_expr_exists<V>(v: &mut V, node: &ExprExists)
where
    V: Visit + ?Sized,
{
    v.visit_query_plan(&node.subquery);
}

pub fn visit_expr_in_list<V>(v: &mut V, node: &ExprInList)
where
    V: Visit + ?Sized,
{
    v.visit_expr(&node.expr);
    for expr in &node.list {
        v.visit_expr(expr);
    }
}

pub fn visit_expr_in_subquery<V>(v: &mut V, node: &ExprInSubquery)
where
    V: Visit + ?Sized,
{
    v.visit_expr(&node.expr);
    v.visit_query_plan(&node.subquery);
}

pub fn visit_expr_is_null<V>(v: &mut V, node: &ExprIsNull)
where
    V: Visit + ?Sized,
{
    v.visit_expr(&node.expr);
}

pub fn visit_expr_like<V>(v: &mut V, node: &ExprLike)
where
    V: Visit + ?Sized,
{
    v.visit_expr(&node.expr);
}

pub fn visit_expr_not<V>(v: &mut V, node: &ExprNot)
where
    V: Visit + ?Sized,
{
    v.visit_expr(&node.expr);
}

pub fn visit_expr_or<V>(v: &mut V, node: &ExprOr)
where
    V: Visit + ?Sized,
{
    for expr in node {
        v.visit_expr(expr);
    }
}

pub fn visit_join<V>(v: &mut V, node: &Join)
where
    V: Visit + ?Sized,
{
    if let Some(subquery) = &node.subquery {
        v.visit_query_plan(subquery);
    }

    v.visit_expr(&node.on);
}

pub fn visit_order_by_expr<V>(v: &mut V, node: &OrderByExpr)
where
    V: Visit + ?Sized,
{
    v.visit_expr(&node.expr);
}

pub fn visit_projection<V>(v: &mut V, node: &Projection)
where
    V: Visit + ?Sized,
{
    for item in node {
        v.visit_expr(&item.expr);
    }
}

pub fn visit_query_plan<V>(v: &mut V, node: &QueryPlan)
where
    V: Visit + ?Sized,
{
    for join in &node.joins {
        v.visit_join(join);
    }

    if let Some(filter) = &node.filter {
        v.visit_expr(filter);
    }

    v.visit_projection(&node.projection);

    for key in &node.group_by {
        v.visit_expr(key);
    }

    if let Some(having) = &node.having {
        v.visit_expr(having);
    }

    for order_by in &node.order_by {
        v.visit_order_by_expr(order_by);
    }

    for set_op in &node.set_ops {
        v.visit_query_plan(&set_op.query);
    }
}

pub fn visit_value<V>(v: &mut V, node: &Value)
where
    V: Visit + ?Sized,
{
}

/// Calls `f` on every expression in `node`, children first.
pub fn for_each_expr<F>(node: &Expr, f: F)
where
    F: FnMut(&Expr),
{
    struct ForEach<F> {
        f: F,
    }

    impl<F> Visit for ForEach<F>
    where
        F: FnMut(&Expr),
    {
        fn visit_expr(&mut self, node: &Expr) {
            visit_expr(self, node);
            (self.f)(node);
        }
    }

    ForEach { f }.visit_expr(node);
}
