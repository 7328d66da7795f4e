//! Wire error representation
//!
//! All errors encode to JSON as:
//! ```json
//! {
//!   "code": "InvalidTransition",
//!   "message": "invalid transition: CREATED -> SOLD"
//! }
//! ```
//!
//! The `code` strings are the canonical, frozen codes from
//! [`chaintrace_core::error::Error::error_code`].

use chaintrace_core::error::Error;
use serde::Serialize;

/// Wire error for JSON encoding.
#[derive(Debug, Clone, Serialize)]
pub struct WireError {
    /// The canonical error code (e.g. "NotFound", "InvalidTransition")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl From<&Error> for WireError {
    fn from(err: &Error) -> Self {
        WireError {
            code: err.error_code().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<Error> for WireError {
    fn from(err: Error) -> Self {
        WireError::from(&err)
    }
}
