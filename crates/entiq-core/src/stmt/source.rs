use super::TableAlias;

/// The base table of a query.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub entity: String,
    pub table_name: String,
    pub alias: TableAlias,
}
