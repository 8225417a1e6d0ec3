use pretty_assertions::assert_eq;
use tests::prelude::*;

use entiq::{
    stmt::{AggregateFunc, ExprAggregate},
    Aggregate,
};

fn aggregate(func: AggregateFunc, arg: impl Into<Expr>) -> Expr {
    Expr::aggregate(func, arg)
}

#[test]
fn grouped_projection_of_key_and_aggregates() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Blog>()
        .group_by(|b| b.topic_id())?
        .select(|g| {
            (
                g.key(),
                count_star(),
                g.group_table().score().avg(),
                g.group_table().star().max(),
            )
        })?
        .compile()?;

    assert_eq!(plan.group_by, vec![Expr::column(col(0, 6))]);

    // The projected key is the grouping key itself.
    assert_eq!(plan.projection.items[0].expr, plan.group_by[0]);
    assert_eq!(plan.projection.items[1].expr, Expr::count_star());
    assert_eq!(
        plan.projection.items[2].expr,
        aggregate(AggregateFunc::Avg, col(0, 4))
    );

    assert_eq!(
        plan.shape(),
        vec![Type::String, Type::I64, Type::F64, Type::I32]
    );
    assert_eq!(plan.filter, Some(Expr::eq(col(0, 7), false)));

    Ok(())
}

#[test]
fn having_filters_groups() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Blog>()
        .group_by(|b| b.topic_id())?
        .having(|g| {
            g.group_table().star().sum().gt(10);
            g.key().ne("t0");
        })?
        .having(|_| count_star().ge(2_i64))?
        .select(|g| (g.key(), g.group_table().star().sum()))?
        .compile()?;

    assert_eq!(
        plan.having,
        Some(Expr::and_from_vec(vec![
            Expr::gt(aggregate(AggregateFunc::Sum, col(0, 3)), 10_i64),
            Expr::ne(col(0, 6), "t0"),
            Expr::ge(Expr::count_star(), 2_i64),
        ]))
    );
    assert_eq!(plan.shape(), vec![Type::String, Type::I64]);

    Ok(())
}

#[test]
fn integer_sums_widen_to_i64() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Blog>()
        .group_by(|b| b.topic_id())?
        .select(|g| {
            let stars: Aggregate<i64> = g.group_table().star().sum();
            let score: Aggregate<f64> = g.group_table().score().sum();
            (g.key(), stars, score)
        })?
        .compile()?;

    assert_eq!(plan.shape(), vec![Type::String, Type::I64, Type::F64]);

    Ok(())
}

#[test]
fn grouping_across_joined_tables() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Topic>()
        .left_join::<Blog, _, _>(|(topic, b)| b.topic_id().eq(topic.id()))?
        .group_by(|(topic, _)| (topic.id(), topic.title()))?
        .select(|g| {
            (
                g.key1(),
                g.key2(),
                g.t2().id().count(),
                g.t2().score().avg(),
            )
        })?
        .compile()?;

    assert_eq!(
        plan.group_by,
        vec![Expr::column(col(0, 0)), Expr::column(col(0, 1))]
    );
    assert_eq!(
        plan.projection.items[2].expr,
        aggregate(AggregateFunc::Count, col(1, 0))
    );
    assert_eq!(
        plan.projection.items[3].expr,
        aggregate(AggregateFunc::Avg, col(1, 4))
    );
    assert_eq!(
        plan.shape(),
        vec![Type::String, Type::String, Type::I64, Type::F64]
    );

    Ok(())
}

#[test]
fn joined_table_column_must_be_grouped() {
    let t = TestDb::new();

    let res = t
        .db
        .query::<Topic>()
        .left_join::<Blog, _, _>(|(topic, b)| b.topic_id().eq(topic.id()))
        .and_then(|query| query.group_by(|(topic, _)| topic.id()))
        .and_then(|grouped| grouped.select(|g| (g.key(), g.t1().title())));

    assert_err!(res, is_invalid_projection);
}

#[test]
fn multiple_keys() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Blog>()
        .group_by(|b| (b.topic_id(), b.status()))?
        .order_by(|g| g.key2().asc())?
        .select(|g| (g.key1(), g.key2(), count_star()))?
        .compile()?;

    assert_eq!(
        plan.group_by,
        vec![Expr::column(col(0, 6)), Expr::column(col(0, 5))]
    );
    assert_eq!(plan.order_by, vec![stmt::OrderByExpr::asc(col(0, 5))]);
    assert_eq!(plan.shape(), vec![Type::String, Type::I32, Type::I64]);

    Ok(())
}

#[test]
fn grouping_by_a_navigated_column() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Blog>()
        .group_by(|b| b.topic().title())?
        .select(|g| (g.key(), g.group_table().id().count_distinct()))?
        .compile()?;

    assert_eq!(plan.joins.len(), 1);
    assert_eq!(plan.group_by, vec![Expr::column(col(1, 1))]);
    assert_eq!(
        plan.projection.items[1].expr,
        Expr::from(ExprAggregate {
            func: AggregateFunc::Count,
            arg: Some(Box::new(Expr::column(col(0, 0)))),
            distinct: true,
        })
    );

    Ok(())
}

#[test]
fn filtered_aggregate_becomes_case_expression() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Blog>()
        .group_by(|b| b.topic_id())?
        .select(|g| {
            (
                g.key(),
                count_star().filter(|| g.group_table().status().eq(1)),
                g.group_table()
                    .score()
                    .sum()
                    .filter(|| g.group_table().star().gt(3)),
            )
        })?
        .compile()?;

    assert_eq!(
        plan.projection.items[1].expr,
        aggregate(
            AggregateFunc::Count,
            Expr::case_when(Expr::eq(col(0, 5), 1_i32), 1_i64, Expr::null()),
        )
    );
    assert_eq!(
        plan.projection.items[2].expr,
        aggregate(
            AggregateFunc::Sum,
            Expr::case_when(Expr::gt(col(0, 3), 3_i32), col(0, 4), Expr::null()),
        )
    );

    Ok(())
}

#[test]
fn ungrouped_column_is_rejected() {
    let t = TestDb::new();

    let res = t
        .db
        .query::<Blog>()
        .group_by(|b| b.topic_id())
        .and_then(|grouped| grouped.select(|g| (g.key(), g.group_table().title())));

    assert_err!(res, is_invalid_projection);
}

#[test]
fn order_by_aggregate() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Blog>()
        .group_by(|b| b.topic_id())?
        .order_by(|_| count_star().desc())?
        .select(|g| (g.key(), count_star()))?
        .limit(5)
        .compile()?;

    assert_eq!(plan.order_by, vec![stmt::OrderByExpr::desc(Expr::count_star())]);
    assert_eq!(plan.limit, Some(Limit::new(None, Some(5))));

    Ok(())
}

#[tokio::test]
async fn grouped_rows_are_records() -> Result<()> {
    let t = TestDb::new();

    t.script.push(Response::values([
        row(["t1".into(), Value::I64(3)]),
        row(["t2".into(), Value::I64(1)]),
    ]));

    let rows = t
        .db
        .query::<Blog>()
        .group_by(|b| b.topic_id())?
        .select(|g| (g.key(), count_star()))?
        .to_list()
        .await?;

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], Value::from("t1"));
    assert_eq!(rows[0][1], Value::I64(3));

    Ok(())
}
