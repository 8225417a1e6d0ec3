use super::Error;

/// Error when a grouped query projects an expression that is neither a
/// grouping key nor an aggregate.
#[derive(Debug)]
pub(super) struct InvalidProjection {
    message: Box<str>,
}

impl std::error::Error for InvalidProjection {}

impl core::fmt::Display for InvalidProjection {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid projection: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid projection error.
    pub fn invalid_projection(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidProjection(InvalidProjection {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid projection error.
    pub fn is_invalid_projection(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidProjection(_))
    }
}
