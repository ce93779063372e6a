//! Structured error values: codes, messages, statuses and causes

pub mod definitions;
pub mod render;
pub mod response;
pub mod status;
pub mod wrapper;

pub use definitions::{internal_error, unknown_error, INTERNAL_ERROR_CODE, UNKNOWN_ERROR_CODE};
pub use status::{status_label, Status};
pub use wrapper::{BoxError, DecodeError, ErrorWrapper, SharedCause, TextCause};

use std::error::Error as StdError;
use std::sync::Arc;

/// View an arbitrary error as an [`ErrorWrapper`], if it is one.
///
/// Also sees through `Box<ErrorWrapper>` and `Arc<ErrorWrapper>`.
pub fn as_wrapper<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a ErrorWrapper> {
    err.downcast_ref::<ErrorWrapper>()
        .or_else(|| err.downcast_ref::<Box<ErrorWrapper>>().map(|boxed| &**boxed))
        .or_else(|| err.downcast_ref::<Arc<ErrorWrapper>>().map(|shared| &**shared))
}

/// Define a reusable template from a code and a status
pub fn define(code: impl Into<String>, status: u16) -> ErrorWrapper {
    ErrorWrapper::define(code, status)
}

/// Derive an occurrence from `definition`, attaching `cause`
pub fn from_definition(definition: &ErrorWrapper, cause: Option<BoxError>) -> ErrorWrapper {
    definition.from_definition(cause)
}

/// Wrap an error with a message.
///
/// An [`ErrorWrapper`] keeps its identity: the message is appended and a text
/// snapshot of its plain form becomes (or merges into) its cause. A boxed or
/// shared wrapper is copied first. Any other error becomes the cause of a fresh
/// `unknown_error`.
pub fn wrap(err: impl Into<BoxError>, message: impl Into<String>) -> ErrorWrapper {
    let err: BoxError = err.into();
    match err.downcast::<ErrorWrapper>() {
        Ok(wrapper) => {
            let wrapper = *wrapper;
            let snapshot = TextCause(wrapper.to_string());
            wrapper.with_message(message).with_cause(snapshot)
        }
        Err(other) => match as_wrapper(other.as_ref()) {
            Some(wrapper) => {
                let wrapper = wrapper.clone();
                let snapshot = TextCause(wrapper.to_string());
                wrapper.with_message(message).with_cause(snapshot)
            }
            None => unknown_error()
                .from_definition(Some(other))
                .with_message(message),
        },
    }
}

/// Whether two errors are the same.
///
/// Two wrappers are compared by their verbose renderings; anything else only
/// matches itself.
pub fn is(err: &(dyn StdError + 'static), target: &(dyn StdError + 'static)) -> bool {
    match (as_wrapper(err), as_wrapper(target)) {
        (Some(err), Some(target)) => err.verbose() == target.verbose(),
        _ => std::ptr::addr_eq(err as *const dyn StdError, target as *const dyn StdError),
    }
}

/// Joined codes of a wrapper, empty for other errors
pub fn code(err: &(dyn StdError + 'static)) -> String {
    as_wrapper(err).map(ErrorWrapper::code).unwrap_or_default()
}

/// Joined messages of a wrapper, empty for other errors
pub fn message(err: &(dyn StdError + 'static)) -> String {
    as_wrapper(err).map(ErrorWrapper::message).unwrap_or_default()
}

/// Verbose status list of a wrapper, empty for other errors
pub fn status(err: &(dyn StdError + 'static)) -> String {
    as_wrapper(err).map(ErrorWrapper::status).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_as_wrapper() {
        let wrapped = ErrorWrapper::new("testing_error", None);
        let foreign = io::Error::new(io::ErrorKind::Other, "disk on fire");

        assert!(as_wrapper(&wrapped).is_some());
        assert!(as_wrapper(&foreign).is_none());
    }

    #[test]
    fn test_as_wrapper_sees_through_box_and_arc() {
        let boxed = Box::new(ErrorWrapper::new("boxed_error", None));
        let shared = Arc::new(ErrorWrapper::new("shared_error", None));

        assert_eq!(as_wrapper(&boxed).map(ErrorWrapper::code).as_deref(), Some("boxed_error"));
        assert_eq!(as_wrapper(&shared).map(ErrorWrapper::code).as_deref(), Some("shared_error"));
        assert_eq!(code(&shared), "shared_error");
    }

    #[test]
    fn test_wrap_shared_wrapper_keeps_code() {
        let shared = Arc::new(ErrorWrapper::define("not_found", 404).from_definition(None));
        let wrapped = wrap(Arc::clone(&shared), "outer");

        assert_eq!(wrapped.code(), "not_found");
        assert_eq!(wrapped.messages(), vec!["outer"]);
        assert_eq!(wrapped.statuses(), vec![Status::new(404)]);
        assert!(shared.messages().is_empty());
    }

    #[test]
    fn test_wrap_foreign_error_uses_unknown_error() {
        let err = wrap(
            io::Error::new(io::ErrorKind::Other, "disk on fire"),
            "could not save car",
        );

        assert_eq!(err.code(), UNKNOWN_ERROR_CODE);
        assert_eq!(err.message(), "could not save car");
        assert_eq!(err.statuses(), vec![Status::new(500)]);
        assert_eq!(err.to_string(), "cause: [disk on fire]; code: [unknown_error]");
    }

    #[test]
    fn test_wrap_wrapper_keeps_identity() {
        let err = ErrorWrapper::new("testing_error", None).with_message("inner");
        let wrapped = wrap(err, "outer");

        assert_eq!(wrapped.code(), "testing_error");
        assert_eq!(wrapped.messages(), vec!["inner", "outer"]);
        assert_eq!(
            wrapped.to_string(),
            "cause: [code: [testing_error]]; code: [testing_error]"
        );
    }

    #[test]
    fn test_wrap_wrapper_with_cause_merges() {
        let err = ErrorWrapper::new("testing_error", Some("root".into()));
        let wrapped = wrap(err, "outer");

        assert_eq!(
            wrapped.cause().unwrap().to_string(),
            "root; cause: [root]; code: [testing_error];"
        );
    }

    #[test]
    fn test_wrap_does_not_touch_unknown_template() {
        let _ = wrap(io::Error::new(io::ErrorKind::Other, "boom"), "first");
        assert!(unknown_error().messages().is_empty());
        assert!(unknown_error().cause().is_none());
    }

    #[test]
    fn test_free_is_compares_verbose_forms() {
        let a = define("not_found", 404);
        let b = define("not_found", 404);
        let occurrence = from_definition(&a, Some("no rows".into()));

        assert!(is(&a, &b));
        assert!(!is(&a, &occurrence));
    }

    #[test]
    fn test_free_is_falls_back_to_identity() {
        let a = io::Error::new(io::ErrorKind::Other, "same");
        let b = io::Error::new(io::ErrorKind::Other, "same");
        let wrapped = define("not_found", 404);

        assert!(is(&a, &a));
        assert!(!is(&a, &b));
        assert!(!is(&a, &wrapped));
    }

    #[test]
    fn test_accessors() {
        let err = ErrorWrapper::new("testing_error", None)
            .with_message("a")
            .with_message("b")
            .with_status(404);
        let foreign = io::Error::new(io::ErrorKind::Other, "boom");

        assert_eq!(code(&err), "testing_error");
        assert_eq!(message(&err), "a; b");
        assert_eq!(status(&err), "[{\"message\": \"Not Found\", \"code\": 404}]");
        assert_eq!(code(&foreign), "");
        assert_eq!(message(&foreign), "");
        assert_eq!(status(&foreign), "");
    }
}
