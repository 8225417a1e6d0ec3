use super::{Expr, Type};

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionItem {
    pub expr: Expr,
    pub ty: Type,
}

/// The ordered list of expressions a query returns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    pub items: Vec<ProjectionItem>,
}

impl Projection {
    pub fn new(items: Vec<ProjectionItem>) -> Self {
        Self { items }
    }

    pub fn single(expr: impl Into<Expr>, ty: Type) -> Self {
        Self {
            items: vec![ProjectionItem {
                expr: expr.into(),
                ty,
            }],
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Arity and type order of the projection, used to check set operations.
    pub fn shape(&self) -> Vec<Type> {
        self.items.iter().map(|item| item.ty.clone()).collect()
    }

    /// Returns `true` if two projections may be combined by a set operation:
    /// same arity and the same type at every position.
    pub fn is_compatible_with(&self, other: &Projection) -> bool {
        self.len() == other.len()
            && self
                .items
                .iter()
                .zip(&other.items)
                .all(|(lhs, rhs)| lhs.ty.unifies_with(&rhs.ty))
    }
}

impl<'a> IntoIterator for &'a Projection {
    type IntoIter = std::slice::Iter<'a, ProjectionItem>;
    type Item = &'a ProjectionItem;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
