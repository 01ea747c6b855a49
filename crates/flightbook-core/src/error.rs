//! Hard failures of the core.
//!
//! Almost everything degrades to an empty or zeroed value instead of
//! failing; the only input the core refuses outright is text it cannot
//! decode.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Telemetry or annotation bytes are not valid UTF-8.
    #[error("input is not valid UTF-8 text (first bad byte at offset {offset})")]
    InvalidEncoding { offset: usize },
}

impl From<std::str::Utf8Error> for CoreError {
    fn from(err: std::str::Utf8Error) -> Self {
        CoreError::InvalidEncoding {
            offset: err.valid_up_to(),
        }
    }
}
