use super::{Column, LogicalDelete, Navigation};
use crate::{stmt, Error, Result};

/// Metadata for one entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Name the entity is registered under
    pub name: String,

    /// Storage table name
    pub table_name: String,

    /// Columns in declaration order. Column indices in expressions refer to
    /// positions in this list.
    pub columns: Vec<Column>,

    /// Navigation properties in declaration order
    pub navigations: Vec<Navigation>,

    /// Indices of the primary-key columns
    pub primary_key: Vec<usize>,

    /// Soft-delete marker, if the entity has one
    pub logical_delete: Option<LogicalDelete>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();

        Self {
            table_name: default_table_name(&name),
            name,
            columns: vec![],
            navigations: vec![],
            primary_key: vec![],
            logical_delete: None,
        }
    }

    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    pub fn column(mut self, column: Column) -> Self {
        if column.primary_key {
            self.primary_key.push(self.columns.len());
        }
        self.columns.push(column);
        self
    }

    pub fn navigation(mut self, navigation: Navigation) -> Self {
        self.navigations.push(navigation);
        self
    }

    pub fn logical_delete(mut self, logical_delete: LogicalDelete) -> Self {
        self.logical_delete = Some(logical_delete);
        self
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    /// Resolve a column by property name.
    pub fn resolve_column(&self, name: &str) -> Result<(usize, &Column)> {
        self.column_index(name)
            .map(|index| (index, &self.columns[index]))
            .ok_or_else(|| Error::unknown_column(&self.name, name))
    }

    /// Resolve a navigation by property name.
    pub fn resolve_navigation(&self, name: &str) -> Result<&Navigation> {
        self.navigations
            .iter()
            .find(|navigation| navigation.name == name)
            .ok_or_else(|| Error::unknown_navigation(&self.name, name))
    }

    pub fn is_primary_key(&self, index: usize) -> bool {
        self.primary_key.contains(&index)
    }

    /// Index of the logical-delete column.
    pub fn logical_delete_index(&self) -> Option<usize> {
        let logical_delete = self.logical_delete.as_ref()?;
        self.column_index(&logical_delete.column)
    }

    /// The soft-delete predicate for this entity bound to `alias`.
    pub fn logical_delete_predicate(&self, alias: stmt::TableAlias) -> Option<stmt::Expr> {
        let logical_delete = self.logical_delete.as_ref()?;
        let index = self.column_index(&logical_delete.column)?;
        Some(logical_delete.predicate(alias, index))
    }

    /// Column types in declaration order.
    pub fn shape(&self) -> Vec<stmt::Type> {
        self.columns.iter().map(|column| column.ty.clone()).collect()
    }
}

/// `BlogCategory` becomes `blog_category`.
fn default_table_name(name: &str) -> String {
    let mut table_name = String::with_capacity(name.len() + 4);

    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                table_name.push('_');
            }
            table_name.extend(ch.to_lowercase());
        } else {
            table_name.push(ch);
        }
    }

    table_name
}
