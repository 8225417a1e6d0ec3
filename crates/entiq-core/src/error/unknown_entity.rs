use super::Error;

/// Error when an entity is not present in the registry.
#[derive(Debug)]
pub(super) struct UnknownEntity {
    entity: Box<str>,
}

impl std::error::Error for UnknownEntity {}

impl core::fmt::Display for UnknownEntity {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown entity `{}`", self.entity)
    }
}

impl Error {
    /// Creates an unknown entity error.
    pub fn unknown_entity(entity: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownEntity(UnknownEntity {
            entity: entity.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown entity error.
    pub fn is_unknown_entity(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownEntity(_))
    }
}
