use pretty_assertions::assert_eq;
use tests::prelude::*;

use entiq::stmt::JoinOrigin;

#[test]
fn left_join_binds_the_next_alias() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Blog>()
        .left_join::<Topic, _, _>(|(b, topic)| b.topic_id().eq(topic.id()))?
        .where_(|(_, topic)| topic.stars().gt(10))?
        .compile()?;

    assert_eq!(plan.joins.len(), 1);

    let join = &plan.joins[0];
    assert_eq!(join.kind, JoinKind::Left);
    assert_eq!(join.alias, TableAlias(1));
    assert_eq!(join.entity, "Topic");
    assert_eq!(join.origin, JoinOrigin::Explicit);
    assert_eq!(join.on, Expr::eq(col(0, 6), col(1, 0)));

    assert_eq!(
        plan.filter,
        Some(Expr::and_from_vec(vec![
            Expr::gt(col(1, 2), 10_i32),
            Expr::eq(col(0, 7), false),
        ]))
    );

    // Rows are still loaded as the base entity.
    assert_eq!(plan.projection.len(), 8);

    Ok(())
}

#[test]
fn join_kinds() -> Result<()> {
    let t = TestDb::new();

    let inner = t
        .db
        .query::<Blog>()
        .inner_join::<Topic, _, _>(|(b, topic)| b.topic_id().eq(topic.id()))?
        .compile()?;
    assert_eq!(inner.joins[0].kind, JoinKind::Inner);

    let right = t
        .db
        .query::<Blog>()
        .right_join::<Topic, _, _>(|(b, topic)| b.topic_id().eq(topic.id()))?
        .compile()?;
    assert_eq!(right.joins[0].kind, JoinKind::Right);

    Ok(())
}

#[test]
fn three_tables() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Blog>()
        .inner_join::<Topic, _, _>(|(b, topic)| b.topic_id().eq(topic.id()))?
        .left_join::<Comment, _, _>(|(b, _, c)| c.blog_id().eq(b.id()))?
        .where_(|(_, topic, c)| {
            topic.title().eq("rust");
            c.content().contains("great");
        })?
        .order_by(|(b, _, _)| b.star().desc())?
        .compile()?;

    let entities: Vec<_> = plan.joins.iter().map(|join| join.entity.as_str()).collect();
    assert_eq!(entities, ["Topic", "Comment"]);
    assert_eq!(plan.joins[1].alias, TableAlias(2));
    assert_eq!(plan.joins[1].on, Expr::eq(col(2, 1), col(0, 0)));

    assert_eq!(
        plan.filter,
        Some(Expr::and_from_vec(vec![
            Expr::eq(col(1, 1), "rust"),
            Expr::like(col(2, 2), "%great%"),
            Expr::eq(col(0, 7), false),
        ]))
    );

    Ok(())
}

#[test]
fn explicit_and_implicit_joins_are_separate() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Blog>()
        .left_join::<Topic, _, _>(|(b, topic)| b.topic_id().eq(topic.id()))?
        .where_(|(b, topic)| {
            topic.stars().gt(1);
            b.topic().title().eq("rust");
        })?
        .compile()?;

    assert_eq!(plan.joins.len(), 2);
    assert_eq!(plan.joins[0].origin, JoinOrigin::Explicit);
    assert!(plan.joins[1].is_implicit());
    assert_eq!(plan.joins[1].alias, TableAlias(2));

    Ok(())
}

#[test]
fn navigation_inside_join_condition_is_ordered_after_the_join() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Blog>()
        .left_join::<Comment, _, _>(|(b, c)| {
            c.blog_id().eq(b.id());
            b.topic().stars().gt(3);
        })?
        .compile()?;

    let entities: Vec<_> = plan.joins.iter().map(|join| join.entity.as_str()).collect();
    assert_eq!(entities, ["Comment", "Topic"]);
    assert_eq!(
        plan.joins[0].on,
        Expr::and_from_vec(vec![
            Expr::eq(col(1, 1), col(0, 0)),
            Expr::gt(col(2, 2), 3_i32),
        ])
    );

    Ok(())
}

#[test]
fn errors_in_join_condition_are_reported() {
    let t = TestDb::new();

    let res = t
        .db
        .query::<Blog>()
        .left_join::<Topic, _, _>(|(_, topic)| topic.table().column::<String>("score").eq("x"));

    assert_err!(res, is_unknown_column);
}

#[test]
fn joined_query_projects_columns_of_every_table() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Blog>()
        .left_join::<Topic, _, _>(|(b, topic)| b.topic_id().eq(topic.id()))?
        .select(|(b, topic)| (b.title(), topic.title(), topic.stars()))?
        .compile()?;

    assert_eq!(plan.shape(), vec![Type::String, Type::String, Type::I32]);
    assert_eq!(plan.projection.items[2].expr, Expr::column(col(1, 2)));

    Ok(())
}

#[test]
fn join_a_nested_query_as_a_table() -> Result<()> {
    let t = TestDb::new();

    let starred = t.db.query::<Blog>().where_(|b| b.star().ge(5))?;

    let plan = t
        .db
        .query::<Topic>()
        .inner_join_query(starred, |(topic, b)| b.topic_id().eq(topic.id()))?
        .where_(|(_, b)| b.title().starts_with("rust"))?
        .compile()?;

    let join = &plan.joins[0];
    assert_eq!(join.kind, JoinKind::Inner);
    assert_eq!(join.alias, TableAlias(1));
    assert_eq!(join.entity, "Blog");
    assert!(join.is_subquery());

    // The nested query filters its own rows, logical delete included, so the
    // join condition is left as written.
    assert_eq!(join.on, Expr::eq(col(1, 6), col(0, 0)));

    let nested = join.subquery.as_deref().expect("nested plan");
    assert_eq!(nested.source.entity, "Blog");
    assert_eq!(nested.projection.len(), 8);
    assert_eq!(
        nested.filter,
        Some(Expr::and_from_vec(vec![
            Expr::ge(col(0, 3), 5_i32),
            Expr::eq(col(0, 7), false),
        ]))
    );

    assert_eq!(
        plan.filter,
        Some(Expr::and_from_vec(vec![Expr::like(col(1, 1), "rust%")]))
    );

    Ok(())
}

#[test]
fn nested_query_joins_keep_their_kind() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Blog>()
        .left_join_query(t.db.query::<Topic>(), |(b, topic)| b.topic_id().eq(topic.id()))?
        .right_join_query(t.db.query::<Comment>(), |(b, _, c)| c.blog_id().eq(b.id()))?
        .compile()?;

    let kinds: Vec<_> = plan.joins.iter().map(|join| join.kind).collect();
    assert_eq!(kinds, [JoinKind::Left, JoinKind::Right]);
    assert!(plan.joins.iter().all(|join| join.is_subquery()));
    assert_eq!(plan.joins[1].alias, TableAlias(2));

    Ok(())
}
