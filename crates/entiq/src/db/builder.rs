use super::{Db, Shared};
use crate::{cx::QueryOptions, Entity, Error, Result};

use entiq_core::{driver::Driver, schema, stmt::JoinKind};

use std::sync::Arc;

/// Registers entities and settings, then builds a [`Db`].
#[derive(Default)]
pub struct Builder {
    core: schema::Builder,
    options: QueryOptions,

    /// First registration failure, reported by `build`
    error: Option<Error>,
}

impl Builder {
    pub fn register<E: Entity>(&mut self) -> &mut Self {
        if let Err(err) = self.core.register(E::metadata()) {
            self.error.get_or_insert(err);
        }
        self
    }

    /// Join kind used for joins created by navigation access. Defaults to
    /// `Left`.
    pub fn implicit_join_kind(&mut self, kind: JoinKind) -> &mut Self {
        self.options.implicit_join_kind = kind;
        self
    }

    /// Whether logical-delete predicates are added to queries. Defaults to
    /// `true`.
    pub fn logical_delete(&mut self, enabled: bool) -> &mut Self {
        self.options.logical_delete = enabled;
        self
    }

    /// Set the table name prefix for all tables
    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.core.table_name_prefix(prefix);
        self
    }

    pub fn build(&mut self, driver: impl Driver) -> Result<Db> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }

        let schema = std::mem::take(&mut self.core).build()?;

        tracing::debug!(
            entities = schema.entities().len(),
            implicit_join_kind = ?self.options.implicit_join_kind,
            logical_delete = self.options.logical_delete,
            "built database handle"
        );

        Ok(Db::new(Shared {
            schema: Arc::new(schema),
            driver: Arc::new(driver),
            options: self.options,
        }))
    }
}
