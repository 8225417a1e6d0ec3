use super::Error;
use crate::stmt::Type;

/// Error when two queries with different projection shapes are combined with
/// a set operation.
#[derive(Debug)]
pub(super) struct IncompatibleUnion {
    lhs: Vec<Type>,
    rhs: Vec<Type>,
}

impl std::error::Error for IncompatibleUnion {}

impl core::fmt::Display for IncompatibleUnion {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "incompatible union: left projection {:?} does not match right projection {:?}",
            self.lhs, self.rhs
        )
    }
}

impl Error {
    /// Creates an incompatible union error from the two projection shapes.
    pub fn incompatible_union(lhs: Vec<Type>, rhs: Vec<Type>) -> Error {
        Error::from(super::ErrorKind::IncompatibleUnion(IncompatibleUnion {
            lhs,
            rhs,
        }))
    }

    /// Returns `true` if this error is an incompatible union error.
    pub fn is_incompatible_union(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::IncompatibleUnion(_))
    }
}
