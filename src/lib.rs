//! Structured, composable error values.
//!
//! Define a catalog of templates once with [`define`], derive occurrences with
//! [`ErrorWrapper::from_definition`] and render them in plain, verbose or map form.

pub mod config;
pub mod errors;

pub use errors::{
    as_wrapper, code, define, from_definition, internal_error, is, message, status,
    status_label, unknown_error, wrap, BoxError, DecodeError, ErrorWrapper, SharedCause,
    Status, TextCause,
};
