use super::Error;

/// Error when a query that must produce a row produced none.
#[derive(Debug)]
pub(super) struct EntityNotFound {
    message: Option<Box<str>>,
}

impl std::error::Error for EntityNotFound {}

impl core::fmt::Display for EntityNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("entity not found")?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates an entity not found error with an optional caller-supplied
    /// message.
    pub fn entity_not_found(message: Option<impl Into<String>>) -> Error {
        Error::from(super::ErrorKind::EntityNotFound(EntityNotFound {
            message: message.map(|message| message.into().into()),
        }))
    }

    /// Returns `true` if this error is an entity not found error.
    pub fn is_entity_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::EntityNotFound(_))
    }
}
