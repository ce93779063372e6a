use lazy_static::lazy_static;

use super::wrapper::ErrorWrapper;

pub const INTERNAL_ERROR_CODE: &str = "internal_error";
pub const UNKNOWN_ERROR_CODE: &str = "unknown_error";

lazy_static! {
    static ref INTERNAL_ERROR: ErrorWrapper = ErrorWrapper::define(INTERNAL_ERROR_CODE, 500);
    static ref UNKNOWN_ERROR: ErrorWrapper = ErrorWrapper::define(UNKNOWN_ERROR_CODE, 500);
}

/// Built-in `internal_error` template (500).
///
/// Every call returns a fresh copy, the shared instance itself is never exposed.
pub fn internal_error() -> ErrorWrapper {
    INTERNAL_ERROR.clone()
}

/// Built-in `unknown_error` template (500), used when wrapping foreign errors
pub fn unknown_error() -> ErrorWrapper {
    UNKNOWN_ERROR.clone()
}
