use super::Error;

/// Error when a tracking operation runs outside of an active tracking scope.
#[derive(Debug)]
pub(super) struct TrackingNotActive {
    operation: Box<str>,
}

impl std::error::Error for TrackingNotActive {}

impl core::fmt::Display for TrackingNotActive {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "tracking is not active: {} requires an active tracking scope",
            self.operation
        )
    }
}

impl Error {
    /// Creates a tracking not active error for the named operation.
    pub fn tracking_not_active(operation: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::TrackingNotActive(TrackingNotActive {
            operation: operation.into().into(),
        }))
    }

    /// Returns `true` if this error is a tracking not active error.
    pub fn is_tracking_not_active(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TrackingNotActive(_))
    }
}
