use super::Error;

/// Error when a page request uses an index or size below one, or one whose
/// row offset does not fit in 64 bits.
#[derive(Debug)]
pub(super) struct InvalidPageRequest {
    page_index: i64,
    page_size: i64,
}

impl std::error::Error for InvalidPageRequest {}

impl core::fmt::Display for InvalidPageRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.page_index < 1 || self.page_size < 1 {
            write!(
                f,
                "invalid page request: page index {} and page size {} must both be at least 1",
                self.page_index, self.page_size
            )
        } else {
            write!(
                f,
                "invalid page request: page {} of size {} starts past the last addressable row",
                self.page_index, self.page_size
            )
        }
    }
}

impl Error {
    /// Creates an invalid page request error.
    pub fn invalid_page_request(page_index: i64, page_size: i64) -> Error {
        Error::from(super::ErrorKind::InvalidPageRequest(InvalidPageRequest {
            page_index,
            page_size,
        }))
    }

    /// Returns `true` if this error is an invalid page request error.
    pub fn is_invalid_page_request(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidPageRequest(_))
    }
}
