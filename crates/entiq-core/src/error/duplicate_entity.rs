use super::Error;

/// Error when an entity name is registered twice.
#[derive(Debug)]
pub(super) struct DuplicateEntity {
    entity: Box<str>,
}

impl std::error::Error for DuplicateEntity {}

impl core::fmt::Display for DuplicateEntity {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "entity `{}` is already registered", self.entity)
    }
}

impl Error {
    /// Creates a duplicate entity error.
    pub fn duplicate_entity(entity: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DuplicateEntity(DuplicateEntity {
            entity: entity.into().into(),
        }))
    }

    /// Returns `true` if this error is a duplicate entity error.
    pub fn is_duplicate_entity(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DuplicateEntity(_))
    }
}
