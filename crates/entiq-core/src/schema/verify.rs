use super::{Entity, Navigation, Relation, Schema};
use crate::{Error, Result};

use std::collections::HashSet;

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        for entity in self.schema.entities() {
            self.verify_primary_key(entity)?;
            self.verify_column_names_are_unique(entity)?;
            self.verify_logical_delete(entity)?;

            for navigation in &entity.navigations {
                self.verify_navigation(entity, navigation).map_err(|err| {
                    err.context(Error::invalid_schema(format!(
                        "navigation `{}` on entity `{}`",
                        navigation.name, entity.name
                    )))
                })?;
            }
        }

        Ok(())
    }

    fn verify_primary_key(&self, entity: &Entity) -> Result<()> {
        if entity.primary_key.is_empty() {
            return Err(Error::invalid_schema(format!(
                "entity `{}` has no primary key",
                entity.name
            )));
        }

        Ok(())
    }

    fn verify_column_names_are_unique(&self, entity: &Entity) -> Result<()> {
        let mut seen = HashSet::new();

        for column in &entity.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "duplicate column `{}` on entity `{}`",
                    column.name, entity.name
                )));
            }
        }

        Ok(())
    }

    fn verify_logical_delete(&self, entity: &Entity) -> Result<()> {
        let Some(logical_delete) = &entity.logical_delete else {
            return Ok(());
        };

        let (index, column) = entity.resolve_column(&logical_delete.column).map_err(|err| {
            err.context(Error::invalid_schema(format!(
                "logical delete marker on entity `{}`",
                entity.name
            )))
        })?;

        if entity.is_primary_key(index) || !logical_delete.accepts(&column.ty, column.nullable) {
            return Err(Error::invalid_schema(format!(
                "column `{}` on entity `{}` cannot carry a {:?} logical delete marker",
                column.name, entity.name, logical_delete.strategy
            )));
        }

        Ok(())
    }

    fn verify_navigation(&self, entity: &Entity, navigation: &Navigation) -> Result<()> {
        let target = self.schema.resolve(&navigation.target)?;

        entity.resolve_column(&navigation.self_property)?;
        target.resolve_column(&navigation.target_property)?;

        if let Relation::ManyToMany(many_to_many) = &navigation.relation {
            let mapping = self.schema.resolve(&many_to_many.mapping)?;
            mapping.resolve_column(&many_to_many.self_mapping_property)?;
            mapping.resolve_column(&many_to_many.target_mapping_property)?;
        }

        Ok(())
    }
}
