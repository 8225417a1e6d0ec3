mod adhoc;
mod driver;
mod duplicate_entity;
mod entity_not_found;
mod incompatible_union;
mod invalid_page_request;
mod invalid_projection;
mod invalid_schema;
mod invalid_statement;
mod tracking_not_active;
mod type_mismatch;
mod unknown_column;
mod unknown_entity;
mod unknown_navigation;

use adhoc::AdhocError;
use driver::DriverError;
use duplicate_entity::DuplicateEntity;
use entity_not_found::EntityNotFound;
use incompatible_union::IncompatibleUnion;
use invalid_page_request::InvalidPageRequest;
use invalid_projection::InvalidProjection;
use invalid_schema::InvalidSchema;
use invalid_statement::InvalidStatement;
use std::sync::Arc;
use tracking_not_active::TrackingNotActive;
use type_mismatch::TypeMismatch;
use unknown_column::UnknownColumn;
use unknown_entity::UnknownEntity;
use unknown_navigation::UnknownNavigation;

/// Return early with an ad-hoc error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Build an ad-hoc error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur in entiq.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context is shown first,
    /// followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let kind = match consequent.inner {
            Some(inner) => match Arc::try_unwrap(inner) {
                Ok(inner) => inner.kind,
                Err(shared) => ErrorKind::Adhoc(AdhocError::new(shared.kind.to_string())),
            },
            None => ErrorKind::Unknown,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }

    /// Returns `true` if this error, or any error in its cause chain, matches
    /// the given predicate.
    pub fn any_cause(&self, f: impl Fn(&Error) -> bool) -> bool {
        self.chain().any(f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Driver(err) => Some(err),
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    Driver(DriverError),
    DuplicateEntity(DuplicateEntity),
    EntityNotFound(EntityNotFound),
    IncompatibleUnion(IncompatibleUnion),
    InvalidPageRequest(InvalidPageRequest),
    InvalidProjection(InvalidProjection),
    InvalidSchema(InvalidSchema),
    InvalidStatement(InvalidStatement),
    TrackingNotActive(TrackingNotActive),
    TypeMismatch(TypeMismatch),
    UnknownColumn(UnknownColumn),
    UnknownEntity(UnknownEntity),
    UnknownNavigation(UnknownNavigation),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            Driver(err) => core::fmt::Display::fmt(err, f),
            DuplicateEntity(err) => core::fmt::Display::fmt(err, f),
            EntityNotFound(err) => core::fmt::Display::fmt(err, f),
            IncompatibleUnion(err) => core::fmt::Display::fmt(err, f),
            InvalidPageRequest(err) => core::fmt::Display::fmt(err, f),
            InvalidProjection(err) => core::fmt::Display::fmt(err, f),
            InvalidSchema(err) => core::fmt::Display::fmt(err, f),
            InvalidStatement(err) => core::fmt::Display::fmt(err, f),
            TrackingNotActive(err) => core::fmt::Display::fmt(err, f),
            TypeMismatch(err) => core::fmt::Display::fmt(err, f),
            UnknownColumn(err) => core::fmt::Display::fmt(err, f),
            UnknownEntity(err) => core::fmt::Display::fmt(err, f),
            UnknownNavigation(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown entiq error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}
