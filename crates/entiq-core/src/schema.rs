mod builder;
pub use builder::Builder;

mod column;
pub use column::Column;

mod entity;
pub use entity::Entity;

mod logical_delete;
pub use logical_delete::{LogicalDelete, LogicalDeleteStrategy};

mod navigation;
pub use navigation::{ManyToMany, Navigation, Relation};

mod verify;

use crate::{Error, Result};

use indexmap::IndexMap;

/// The frozen registry of entity metadata.
///
/// A `Schema` is produced once by [`Builder::build`] and never mutated
/// afterwards; it is shared between queries as `Arc<Schema>`.
#[derive(Debug, Default)]
pub struct Schema {
    entities: IndexMap<String, Entity>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Look up an entity by name.
    pub fn resolve(&self, name: &str) -> Result<&Entity> {
        self.entities
            .get(name)
            .ok_or_else(|| Error::unknown_entity(name))
    }

    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    /// Entities in registration order.
    pub fn entities(&self) -> impl ExactSizeIterator<Item = &Entity> {
        self.entities.values()
    }

    /// The navigations declared on `name`, in declaration order.
    pub fn navigations_of(&self, name: &str) -> Result<&[Navigation]> {
        Ok(&self.resolve(name)?.navigations)
    }
}
