use super::Error;

/// Error when a column name is not declared by an entity.
#[derive(Debug)]
pub(super) struct UnknownColumn {
    entity: Box<str>,
    column: Box<str>,
}

impl std::error::Error for UnknownColumn {}

impl core::fmt::Display for UnknownColumn {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unknown column `{}` on entity `{}`",
            self.column, self.entity
        )
    }
}

impl Error {
    /// Creates an unknown column error.
    pub fn unknown_column(entity: impl Into<String>, column: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownColumn(UnknownColumn {
            entity: entity.into().into(),
            column: column.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown column error.
    pub fn is_unknown_column(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownColumn(_))
    }
}
