use super::*;

/// An immutable, fully resolved query.
///
/// Plans carry only names, aliases and column indices. They hold no reference
/// to the context that built them and can be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    /// The base table
    pub source: Source,

    /// Joins in first-reference order
    pub joins: Vec<Join>,

    /// Row filter
    pub filter: Option<Expr>,

    /// Returned expressions
    pub projection: Projection,

    /// Grouping keys
    pub group_by: Vec<Expr>,

    /// Filter applied to groups
    pub having: Option<Expr>,

    pub order_by: Vec<OrderByExpr>,

    pub limit: Option<Limit>,

    /// Queries combined with this one, in application order
    pub set_ops: Vec<SetOperation>,
}

impl QueryPlan {
    pub fn new(source: Source, projection: Projection) -> Self {
        Self {
            source,
            joins: vec![],
            filter: None,
            projection,
            group_by: vec![],
            having: None,
            order_by: vec![],
            limit: None,
            set_ops: vec![],
        }
    }

    /// The entity bound to `alias`, if the alias is part of this plan.
    pub fn entity_of(&self, alias: TableAlias) -> Option<&str> {
        if self.source.alias == alias {
            return Some(&self.source.entity);
        }

        self.joins
            .iter()
            .find(|join| join.alias == alias)
            .map(|join| join.entity.as_str())
    }

    pub fn contains_alias(&self, alias: TableAlias) -> bool {
        self.entity_of(alias).is_some()
    }

    pub fn implicit_joins(&self) -> impl Iterator<Item = &Join> {
        self.joins.iter().filter(|join| join.is_implicit())
    }

    pub fn is_grouped(&self) -> bool {
        !self.group_by.is_empty()
    }

    pub fn shape(&self) -> Vec<Type> {
        self.projection.shape()
    }
}
