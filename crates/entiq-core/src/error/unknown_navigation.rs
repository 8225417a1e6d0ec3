use super::Error;

/// Error when a navigation path step does not name a declared navigation.
#[derive(Debug)]
pub(super) struct UnknownNavigation {
    entity: Box<str>,
    navigation: Box<str>,
}

impl std::error::Error for UnknownNavigation {}

impl core::fmt::Display for UnknownNavigation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unknown navigation `{}` on entity `{}`",
            self.navigation, self.entity
        )
    }
}

impl Error {
    /// Creates an unknown navigation error.
    pub fn unknown_navigation(entity: impl Into<String>, navigation: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownNavigation(UnknownNavigation {
            entity: entity.into().into(),
            navigation: navigation.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown navigation error.
    pub fn is_unknown_navigation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownNavigation(_))
    }
}
