use pretty_assertions::assert_eq;
use tests::prelude::*;

fn outer(alias: usize, index: usize) -> ExprColumn {
    ExprColumn::with_nesting(1, TableAlias(alias), index)
}

fn statement(plan: &QueryPlan, index: usize) -> &Expr {
    match &plan.filter {
        Some(Expr::And(and)) => &and.operands[index],
        Some(expr) if index == 0 => expr,
        other => panic!("plan has no statement {index}: {other:?}"),
    }
}

fn first_statement(plan: &QueryPlan) -> &Expr {
    statement(plan, 0)
}

#[test]
fn exists_correlates_with_the_enclosing_query() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Blog>()
        .where_(|b| {
            b.exists::<Comment, _>(|q| q.where_(|c| c.blog_id().eq(b.id())))
        })?
        .compile()?;

    let Expr::Exists(exists) = first_statement(&plan) else {
        panic!("expected EXISTS, got {:?}", plan.filter);
    };

    assert!(!exists.negated);
    assert_eq!(exists.subquery.source.entity, "Comment");
    assert_eq!(
        exists.subquery.filter,
        Some(Expr::eq(col(0, 1), outer(0, 0)))
    );

    Ok(())
}

#[test]
fn not_exists() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Blog>()
        .where_(|b| {
            b.not_exists::<Comment, _>(|q| q.where_(|c| c.blog_id().eq(b.id())))
        })?
        .compile()?;

    let Expr::Exists(exists) = first_statement(&plan) else {
        panic!("expected NOT EXISTS, got {:?}", plan.filter);
    };
    assert!(exists.negated);

    Ok(())
}

#[test]
fn subquery_applies_its_own_logical_delete() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Topic>()
        .where_(|topic| {
            topic.exists::<Blog, _>(|q| q.where_(|b| b.topic_id().eq(topic.id())))
        })?
        .compile()?;

    let Expr::Exists(exists) = first_statement(&plan) else {
        panic!("expected EXISTS, got {:?}", plan.filter);
    };

    assert_eq!(
        exists.subquery.filter,
        Some(Expr::and_from_vec(vec![
            Expr::eq(col(0, 6), outer(0, 0)),
            Expr::eq(col(0, 7), false),
        ]))
    );

    Ok(())
}

#[test]
fn nesting_counts_every_enclosing_level() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Blog>()
        .where_(|b| {
            b.exists::<Comment, _>(|q| {
                q.where_(|c| {
                    c.blog_id().eq(b.id());
                    c.exists::<Tag, _>(|q| {
                        q.where_(|tag| {
                            tag.name().eq(b.title());
                            tag.id().ne(c.id());
                        })
                    });
                })
            })
        })?
        .compile()?;

    let Expr::Exists(comments) = first_statement(&plan) else {
        panic!("expected EXISTS, got {:?}", plan.filter);
    };
    let Expr::Exists(tags) = statement(&comments.subquery, 1) else {
        panic!("expected nested EXISTS, got {:?}", comments.subquery.filter);
    };

    assert_eq!(
        tags.subquery.filter,
        Some(Expr::and_from_vec(vec![
            Expr::eq(col(0, 1), ExprColumn::with_nesting(2, TableAlias(0), 1)),
            Expr::ne(col(0, 0), outer(0, 0)),
        ]))
    );

    Ok(())
}

#[test]
fn navigation_of_the_enclosing_query_joins_outside() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Blog>()
        .where_(|b| {
            b.exists::<Comment, _>(|q| q.where_(|c| c.content().eq(b.topic().title())))
        })?
        .compile()?;

    // The join belongs to the outer query; the subquery reads it through
    // a correlated reference.
    assert_eq!(plan.joins.len(), 1);
    assert_eq!(plan.joins[0].entity, "Topic");

    let Expr::Exists(exists) = first_statement(&plan) else {
        panic!("expected EXISTS, got {:?}", plan.filter);
    };
    assert!(exists.subquery.joins.is_empty());
    assert_eq!(
        exists.subquery.filter,
        Some(Expr::eq(col(0, 2), outer(1, 1)))
    );

    Ok(())
}

#[test]
fn in_query_projects_one_column() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Blog>()
        .where_(|b| {
            b.id().in_query::<Comment, _>(|q| {
                q.where_(|c| c.content().contains("great"))?
                    .select(|c| c.blog_id())
            })
        })?
        .compile()?;

    let Expr::InSubquery(in_subquery) = first_statement(&plan) else {
        panic!("expected IN (subquery), got {:?}", plan.filter);
    };

    assert_eq!(*in_subquery.expr, Expr::column(col(0, 0)));
    assert_eq!(in_subquery.subquery.shape(), vec![Type::String]);
    assert_eq!(
        in_subquery.subquery.filter,
        Some(Expr::like(col(0, 2), "%great%"))
    );

    Ok(())
}

#[test]
fn in_query_rejects_wrong_arity() {
    let t = TestDb::new();

    let res = t.db.query::<Blog>().where_(|b| {
        b.id()
            .in_query::<Comment, _>(|q| q.select(|c| (c.blog_id(), c.id())))
    });

    assert_err!(res, is_invalid_projection);
}

#[test]
fn in_query_rejects_wrong_type() {
    let t = TestDb::new();

    let res = t
        .db
        .query::<Blog>()
        .where_(|b| b.star().in_query::<Comment, _>(|q| q.select(|c| c.content())));

    assert_err!(res, is_invalid_projection);
}

#[test]
fn errors_inside_subqueries_surface_from_the_outer_clause() {
    let t = TestDb::new();

    let res = t.db.query::<Blog>().where_(|b| {
        b.exists::<Comment, _>(|q| {
            q.where_(|c| c.table().column::<String>("missing").eq("x"))
        })
    });

    assert_err!(res, is_unknown_column);
}

#[test]
fn exists_combines_with_other_statements() -> Result<()> {
    let t = TestDb::new();

    let plan = t
        .db
        .query::<Blog>()
        .disable_logical_delete()
        .where_(|b| {
            b.star()
                .gt(3)
                .or(b.exists::<Comment, _>(|q| q.where_(|c| c.blog_id().eq(b.id()))))
        })?
        .compile()?;

    let Some(Expr::Or(or)) = &plan.filter else {
        panic!("expected OR, got {:?}", plan.filter);
    };
    assert_eq!(or.operands.len(), 2);
    assert!(matches!(or.operands[1], Expr::Exists(_)));

    Ok(())
}
