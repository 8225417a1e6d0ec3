mod compile;

mod cx;

pub mod db;
pub use db::{Db, Transaction};

mod entity;
pub use entity::{Entity, EntityProxy};

pub mod expr;
pub use expr::{count_star, Aggregate, Column, Expr, IntoExpr, Predicate, PredicateOutput};

mod primitive;
pub use primitive::{Primitive, Summable};

pub mod proxy;
pub use proxy::{AllColumns, TableHandle};

pub mod query;
pub use query::{
    Group, GroupQuery, IntoGroupKeys, IntoProjection, PagePlan, PageResult, Projected, Query, Tables,
};

mod recorder;

pub mod tracking;
pub use tracking::{ChangeMode, ChangeSet, EntityKey, TrackManager, TrackingGuard, Updatable};

pub use entiq_core::{driver, schema, stmt, Error, Result, Schema};
