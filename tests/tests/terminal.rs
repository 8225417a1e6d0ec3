use pretty_assertions::assert_eq;
use tests::prelude::*;

use entiq::driver::Operation;

fn assert_send<T: Send>(_: &T) {}

#[tokio::test]
async fn to_list_loads_entities() -> Result<()> {
    let t = TestDb::new();
    t.script.push(Response::values([
        blog_row("b1", "first", "t1"),
        blog_row("b2", "second", "t2"),
    ]));

    let blogs = t.db.query::<Blog>().to_list().await?;

    assert_eq!(blogs.len(), 2);
    assert_eq!(blogs[0].id, "b1");
    assert_eq!(blogs[1].topic_id, "t2");
    assert_eq!(blogs[1].content, None);

    let queries = t.log.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].source.table_name, "blog");

    Ok(())
}

#[tokio::test]
async fn first_or_null_limits_to_one_row() -> Result<()> {
    let t = TestDb::new();

    let blog = t.db.query::<Blog>().first_or_null().await?;
    assert!(blog.is_none());

    assert_eq!(t.log.queries()[0].limit, Some(Limit::new(None, Some(1))));

    Ok(())
}

#[tokio::test]
async fn first_not_null_reports_missing_rows() -> Result<()> {
    let t = TestDb::new();

    let err = t
        .db
        .query::<Blog>()
        .where_by_id("nope")?
        .first_not_null()
        .await
        .unwrap_err();
    assert!(err.is_entity_not_found());
    assert_eq!(err.to_string(), "entity not found");

    let err = t
        .db
        .query::<Blog>()
        .first_not_null_with("blog b9 is gone")
        .await
        .unwrap_err();
    assert!(err.is_entity_not_found());
    assert_eq!(err.to_string(), "entity not found: blog b9 is gone");

    Ok(())
}

#[tokio::test]
async fn count_and_any() -> Result<()> {
    let t = TestDb::new();
    t.script.push(Response::count(4)).push(Response::count(0));

    let query = t.db.query::<Blog>().where_(|b| b.star().gt(3))?;

    assert_eq!(query.count().await?, 4);
    assert!(!query.any().await?);

    let queries = t.log.queries();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].shape(), vec![Type::I64]);
    assert_eq!(queries[0].filter, queries[1].filter);

    Ok(())
}

#[tokio::test]
async fn count_ignores_ordering_and_window() -> Result<()> {
    let t = TestDb::new();
    t.script.push(Response::count(2));

    let count = t
        .db
        .query::<Blog>()
        .order_by(|b| b.title().desc())?
        .limit(1)
        .offset(5)
        .count()
        .await?;

    assert_eq!(count, 2);

    let plan = &t.log.queries()[0];
    assert!(plan.order_by.is_empty());
    assert_eq!(plan.limit, None);

    Ok(())
}

#[tokio::test]
async fn projected_rows_are_records() -> Result<()> {
    let t = TestDb::new();
    t.script.push(Response::values([row(["b1".into(), Value::I32(7)])]));

    let rows = t
        .db
        .query::<Blog>()
        .select(|b| (b.id(), b.star()))?
        .to_list()
        .await?;

    assert_eq!(rows, vec![row(["b1".into(), Value::I32(7)])]);

    Ok(())
}

#[tokio::test]
async fn full_projection_loads_as_entity() -> Result<()> {
    let t = TestDb::new();
    t.script.push(Response::values([blog_row("b1", "first", "t1")]));

    let blogs = t
        .db
        .query::<Blog>()
        .select(|b| b.table().all_columns())?
        .to_entities::<Blog>()
        .await?;
    assert_eq!(blogs[0].title, "first");

    Ok(())
}

#[tokio::test]
async fn partial_projection_fills_missing_columns() -> Result<()> {
    let t = TestDb::new();
    t.script
        .push(Response::values([row(["first".into(), "b1".into()])]));

    let blogs = t
        .db
        .query::<Blog>()
        .select(|b| (b.title(), b.id()))?
        .to_entities::<Blog>()
        .await?;

    assert_eq!(
        blogs,
        vec![Blog {
            id: "b1".to_string(),
            title: "first".to_string(),
            content: None,
            star: 0,
            score: 0.0,
            status: 0,
            topic_id: String::new(),
            deleted: false,
        }]
    );

    // Only the named columns are requested.
    assert_eq!(t.log.queries()[0].shape(), vec![Type::String, Type::String]);

    Ok(())
}

#[tokio::test]
async fn projection_of_other_expressions_is_not_an_entity() {
    let t = TestDb::new();

    let res = t
        .db
        .query::<Blog>()
        .select(|b| (b.id(), b.topic().title()))
        .unwrap()
        .to_entities::<Blog>()
        .await;
    assert_err!(res, is_invalid_projection);

    let res = t
        .db
        .query::<Blog>()
        .select(|b| (b.id(), b.id()))
        .unwrap()
        .to_entities::<Blog>()
        .await;
    assert_err!(res, is_invalid_projection);

    let res = t
        .db
        .query::<Blog>()
        .select(|b| b.id())
        .unwrap()
        .to_entities::<Topic>()
        .await;
    assert_err!(res, is_invalid_projection);

    assert!(t.log.is_empty());
}

#[tokio::test]
async fn partial_projection_rejects_short_rows() {
    let t = TestDb::new();
    t.script.push(Response::values([row(["b1".into()])]));

    let res = t
        .db
        .query::<Blog>()
        .select(|b| (b.id(), b.title()))
        .unwrap()
        .to_entities::<Blog>()
        .await;

    assert_err!(res, is_driver);
}

#[tokio::test]
async fn driver_errors_surface() {
    let t = TestDb::new();
    t.script.push_err(Error::driver_response("boom"));

    let res = t.db.query::<Blog>().to_list().await;

    assert_err!(res, is_driver);
}

#[tokio::test]
async fn malformed_rows_are_rejected() {
    let t = TestDb::new();
    t.script.push(Response::values([row(["b1".into()])]));

    let res = t.db.query::<Blog>().to_list().await;

    assert_err!(res, is_driver);
}

#[tokio::test]
async fn negative_count_is_a_driver_error() {
    let t = TestDb::new();
    t.script.push(Response::values([row([Value::I64(-1)])]));

    let res = t.db.query::<Blog>().count().await;

    assert_err!(res, is_driver);
}

#[tokio::test]
async fn transactions_reach_the_driver() -> Result<()> {
    let mut t = TestDb::new();

    let tx = t.db.transaction().await?;
    tx.commit().await?;

    let tx = t.db.transaction().await?;
    tx.rollback().await?;

    assert!(t.log.has_transaction(Transaction::Rollback));
    assert_eq!(t.log.count(|op| op.is_transaction()), 4);

    let (op, _) = t.log.pop().expect("begin was logged");
    assert!(matches!(op, Operation::Transaction(Transaction::Begin)));
    let (op, _) = t.log.pop().expect("commit was logged");
    assert!(matches!(op, Operation::Transaction(Transaction::Commit)));
    assert_eq!(t.log.len(), 2);

    Ok(())
}

#[test]
fn as_table_reads_another_table() -> Result<()> {
    let t = TestDb::new();

    let plan = t.db.query::<Blog>().as_table("blog_archive").compile()?;

    assert_eq!(plan.source.entity, "Blog");
    assert_eq!(plan.source.table_name, "blog_archive");

    Ok(())
}

#[test]
fn table_name_prefix_applies_to_every_table() -> Result<()> {
    let t = TestDb::with(|builder| {
        builder.table_name_prefix("app_");
    });

    let plan = t
        .db
        .query::<Blog>()
        .where_(|b| b.topic().title().eq("rust"))?
        .compile()?;

    assert_eq!(plan.source.table_name, "app_blog");
    assert_eq!(plan.joins[0].table_name, "app_t_topic");

    Ok(())
}

#[test]
fn terminal_futures_are_send() -> Result<()> {
    let t = TestDb::new();
    let query = t.db.query::<Blog>();

    assert_send(&query.to_list());
    assert_send(&query.first_or_null());
    assert_send(&query.count());
    assert_send(&query.to_page_result(1, 10));
    assert_send(&query.select(|b| b.id())?.to_list());

    Ok(())
}
