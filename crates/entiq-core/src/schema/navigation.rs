/// A navigation property from one entity to another.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub name: String,

    /// Name of the related entity
    pub target: String,

    pub relation: Relation,

    /// Property on the declaring entity used in the join condition
    pub self_property: String,

    /// Property on the target entity used in the join condition
    pub target_property: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany(ManyToMany),
}

/// The mapping entity of a many-to-many relation.
#[derive(Debug, Clone, PartialEq)]
pub struct ManyToMany {
    /// Name of the mapping entity
    pub mapping: String,

    /// Mapping property matched against the declaring entity's `self_property`
    pub self_mapping_property: String,

    /// Mapping property matched against the target's `target_property`
    pub target_mapping_property: String,
}

impl Navigation {
    fn new(
        name: impl Into<String>,
        target: impl Into<String>,
        relation: Relation,
        self_property: impl Into<String>,
        target_property: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            relation,
            self_property: self_property.into(),
            target_property: target_property.into(),
        }
    }

    pub fn one_to_one(
        name: impl Into<String>,
        target: impl Into<String>,
        self_property: impl Into<String>,
        target_property: impl Into<String>,
    ) -> Self {
        Self::new(name, target, Relation::OneToOne, self_property, target_property)
    }

    pub fn one_to_many(
        name: impl Into<String>,
        target: impl Into<String>,
        self_property: impl Into<String>,
        target_property: impl Into<String>,
    ) -> Self {
        Self::new(name, target, Relation::OneToMany, self_property, target_property)
    }

    pub fn many_to_one(
        name: impl Into<String>,
        target: impl Into<String>,
        self_property: impl Into<String>,
        target_property: impl Into<String>,
    ) -> Self {
        Self::new(name, target, Relation::ManyToOne, self_property, target_property)
    }

    pub fn many_to_many(
        name: impl Into<String>,
        target: impl Into<String>,
        self_property: impl Into<String>,
        target_property: impl Into<String>,
        mapping: ManyToMany,
    ) -> Self {
        Self::new(
            name,
            target,
            Relation::ManyToMany(mapping),
            self_property,
            target_property,
        )
    }

    pub fn as_many_to_many(&self) -> Option<&ManyToMany> {
        match &self.relation {
            Relation::ManyToMany(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Returns `true` if the navigation yields at most one related row.
    pub fn is_single(&self) -> bool {
        matches!(self.relation, Relation::OneToOne | Relation::ManyToOne)
    }
}

impl ManyToMany {
    pub fn new(
        mapping: impl Into<String>,
        self_mapping_property: impl Into<String>,
        target_mapping_property: impl Into<String>,
    ) -> Self {
        Self {
            mapping: mapping.into(),
            self_mapping_property: self_mapping_property.into(),
            target_mapping_property: target_mapping_property.into(),
        }
    }
}
