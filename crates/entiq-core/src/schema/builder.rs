use super::{Entity, Schema};
use crate::{Error, Result};

use indexmap::IndexMap;

/// Collects entity metadata and freezes it into a [`Schema`].
#[derive(Debug, Default)]
pub struct Builder {
    /// If set, prefix all table names with this string
    table_name_prefix: Option<String>,

    entities: IndexMap<String, Entity>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    /// Register an entity. Fails if an entity with the same name is already
    /// registered.
    pub fn register(&mut self, entity: Entity) -> Result<&mut Self> {
        if self.entities.contains_key(&entity.name) {
            return Err(Error::duplicate_entity(&entity.name));
        }

        tracing::trace!(entity = %entity.name, columns = entity.columns.len(), "registered entity");
        self.entities.insert(entity.name.clone(), entity);
        Ok(self)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    /// Verify every registered entity and freeze the registry.
    pub fn build(self) -> Result<Schema> {
        let mut entities = self.entities;

        if let Some(prefix) = &self.table_name_prefix {
            for entity in entities.values_mut() {
                entity.table_name = format!("{prefix}{}", entity.table_name);
            }
        }

        let schema = Schema { entities };
        schema.verify()?;

        tracing::debug!(entities = schema.entities.len(), "schema built");
        Ok(schema)
    }
}
