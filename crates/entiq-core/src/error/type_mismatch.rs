use super::Error;
use crate::stmt::Type;

/// Error when a literal or handle type does not match a declared column type.
#[derive(Debug)]
pub(super) struct TypeMismatch {
    column: Box<str>,
    expected: Type,
    actual: Type,
}

impl std::error::Error for TypeMismatch {}

impl core::fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "type mismatch on `{}`: expected {:?}, found {:?}",
            self.column, self.expected, self.actual
        )
    }
}

impl Error {
    /// Creates a type mismatch error.
    pub fn type_mismatch(column: impl Into<String>, expected: Type, actual: Type) -> Error {
        Error::from(super::ErrorKind::TypeMismatch(TypeMismatch {
            column: column.into().into(),
            expected,
            actual,
        }))
    }

    /// Returns `true` if this error is a type mismatch error.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TypeMismatch(_))
    }
}
