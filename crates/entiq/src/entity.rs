use crate::{proxy::AllColumns, query::Query, Predicate, Result, TableHandle};

use entiq_core::{schema, stmt};

/// An entity type persisted by entiq.
///
/// Implementations are normally generated: they describe the entity's
/// metadata, build an instance from a row, and report the current column
/// values of an instance.
pub trait Entity: Sized + Send + 'static {
    /// Name the entity is registered under.
    const NAME: &'static str;

    /// The proxy exposing typed column and navigation accessors.
    type Proxy: EntityProxy<Entity = Self>;

    /// Entity metadata. Called once, at registration.
    fn metadata() -> schema::Entity;

    /// Load an instance of the entity, populating fields using the given row.
    /// The row holds one value per column, in declaration order.
    fn load(record: stmt::Record) -> Result<Self>;

    /// The current column values, in declaration order.
    fn record(&self) -> stmt::Record;
}

/// A view of one table occurrence inside a query.
pub trait EntityProxy: Clone + 'static {
    type Entity: Entity<Proxy = Self>;

    fn from_table(table: TableHandle) -> Self;

    fn table(&self) -> &TableHandle;

    /// Every column of the table, for use as a projection.
    fn all_columns(&self) -> AllColumns {
        self.table().all_columns()
    }

    /// A correlated `EXISTS` over `E`.
    fn exists<E, F>(&self, f: F) -> Predicate
    where
        E: Entity,
        F: FnOnce(Query<E>) -> Result<Query<E>>,
    {
        self.table().exists(f)
    }

    /// A correlated `NOT EXISTS` over `E`.
    fn not_exists<E, F>(&self, f: F) -> Predicate
    where
        E: Entity,
        F: FnOnce(Query<E>) -> Result<Query<E>>,
    {
        self.table().not_exists(f)
    }
}
