use pretty_assertions::assert_eq;
use tests::prelude::*;

use entiq::schema::{self, LogicalDelete};

#[test]
fn boolean_marker_filters_the_base_table() -> Result<()> {
    let t = TestDb::new();

    let plan = t.db.query::<Blog>().compile()?;
    assert_eq!(plan.filter, Some(Expr::eq(col(0, 7), false)));

    Ok(())
}

#[test]
fn timestamp_marker_filters_on_null() -> Result<()> {
    let t = TestDb::new();

    let plan = t.db.query::<SysUser>().compile()?;
    assert_eq!(plan.filter, Some(Expr::is_null(col(0, 2))));

    Ok(())
}

#[test]
fn entities_without_marker_are_not_filtered() -> Result<()> {
    let t = TestDb::new();

    let plan = t.db.query::<Topic>().compile()?;
    assert_eq!(plan.filter, None);

    Ok(())
}

#[test]
fn joined_tables_are_filtered_in_the_join_condition() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Topic>()
        .where_(|topic| topic.author().name().eq("ann"))?
        .compile()?;

    assert_eq!(
        plan.joins[0].on,
        Expr::and(
            Expr::eq(col(0, 3), col(1, 0)),
            Expr::is_null(col(1, 2))
        )
    );
    // The base table has no marker, so the filter is the user predicate alone.
    assert_eq!(plan.filter, Some(Expr::eq(col(1, 1), "ann")));

    Ok(())
}

#[test]
fn explicit_joins_are_filtered_too() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Topic>()
        .inner_join::<Blog, _, _>(|(topic, b)| b.topic_id().eq(topic.id()))?
        .compile()?;

    assert_eq!(
        plan.joins[0].on,
        Expr::and(
            Expr::eq(col(1, 6), col(0, 0)),
            Expr::eq(col(1, 7), false)
        )
    );

    Ok(())
}

#[test]
fn disabled_per_query() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Blog>()
        .disable_logical_delete()
        .where_(|b| b.topic().author().name().eq("ann"))?
        .compile()?;

    assert_eq!(
        plan.filter,
        Some(Expr::eq(col(2, 1), "ann"))
    );
    assert_eq!(plan.joins[1].on, Expr::eq(col(1, 3), col(2, 0)));

    // Other queries are unaffected.
    let plan = t.db.query::<Blog>().compile()?;
    assert_eq!(plan.filter, Some(Expr::eq(col(0, 7), false)));

    Ok(())
}

#[test]
fn disabled_globally() -> Result<()> {
    let t = TestDb::with(|builder| {
        builder.logical_delete(false);
    });

    assert_eq!(t.db.query::<Blog>().compile()?.filter, None);
    assert_eq!(t.db.query::<SysUser>().compile()?.filter, None);

    Ok(())
}

#[test]
fn count_plan_keeps_the_marker() -> Result<()> {
    let t = TestDb::new();

    let page = t.db.query::<Blog>().compile_page(1, 10)?;
    assert_eq!(page.count.filter, Some(Expr::eq(col(0, 7), false)));
    assert_eq!(page.data.filter, Some(Expr::eq(col(0, 7), false)));

    Ok(())
}

#[test]
fn marker_column_type_is_verified() {
    let mut builder = entiq::Schema::builder();

    builder
        .register(
            schema::Entity::new("Note")
                .column(schema::Column::new("id", Type::I64).primary_key())
                .column(schema::Column::new("deleted_at", Type::I64))
                .logical_delete(LogicalDelete::timestamp("deleted_at")),
        )
        .unwrap();

    assert_err!(builder.build(), is_invalid_schema);

    let mut builder = entiq::Schema::builder();

    builder
        .register(
            schema::Entity::new("Note")
                .column(schema::Column::new("id", Type::I64).primary_key())
                .column(schema::Column::new("deleted", Type::String))
                .logical_delete(LogicalDelete::boolean("deleted")),
        )
        .unwrap();

    assert_err!(builder.build(), is_invalid_schema);
}

#[test]
fn marker_column_must_exist() {
    let mut builder = entiq::Schema::builder();

    builder
        .register(
            schema::Entity::new("Note")
                .column(schema::Column::new("id", Type::I64).primary_key())
                .logical_delete(LogicalDelete::boolean("deleted")),
        )
        .unwrap();

    assert!(builder.build().is_err());
}
