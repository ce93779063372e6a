use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

use super::render::{bracketed, quoted_list, unquoted_list};
use super::status::Status;

/// Any error value that can become a cause
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// A cause as stored on an [`ErrorWrapper`]
pub type SharedCause = Arc<dyn StdError + Send + Sync>;

/// Synthetic cause that only carries text, e.g. two merged causes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TextCause(pub String);

/// The verbose form could not be decoded into a map
#[derive(Debug, Error)]
#[error("error parsing wrapperrors map: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

#[derive(Debug, Clone, Default)]
struct WrapperState {
    message: Vec<String>,
    status: Vec<Status>,
    cause: Option<SharedCause>,
}

/// Structured error carrying classification codes, messages, statuses and a cause.
///
/// Messages, statuses and the cause sit behind a per-instance lock, so a single
/// instance can be shared between threads and still accumulate entries in call
/// order. Cloning allocates a fresh lock.
#[derive(Debug)]
pub struct ErrorWrapper {
    code: Vec<String>,
    state: RwLock<WrapperState>,
}

impl ErrorWrapper {
    /// Create an occurrence error with a single code and an optional cause
    pub fn new(code: impl Into<String>, cause: Option<BoxError>) -> Self {
        Self::from_codes(vec![code.into()], cause)
    }

    /// Define a template: a code and a status, no cause and no message
    pub fn define(code: impl Into<String>, status: u16) -> Self {
        let code = code.into();
        debug!(code = %code, status, "Defined error template");

        Self {
            code: vec![code],
            state: RwLock::new(WrapperState {
                status: vec![Status::new(status)],
                ..WrapperState::default()
            }),
        }
    }

    /// Derive an occurrence from this template.
    ///
    /// The template is left untouched; the result owns copies of its codes and
    /// statuses along with the given cause.
    pub fn from_definition(&self, cause: Option<BoxError>) -> Self {
        let derived = Self::from_codes(self.code.clone(), cause);
        for status in self.statuses() {
            derived.add_status(status.code);
        }
        derived
    }

    fn from_codes(code: Vec<String>, cause: Option<BoxError>) -> Self {
        Self {
            code,
            state: RwLock::new(WrapperState {
                cause: cause.map(SharedCause::from),
                ..WrapperState::default()
            }),
        }
    }

    pub fn with_message(self, message: impl Into<String>) -> Self {
        self.add_message(message);
        self
    }

    pub fn with_status(self, status: u16) -> Self {
        self.add_status(status);
        self
    }

    pub fn with_cause(self, cause: impl Into<BoxError>) -> Self {
        self.add_cause(cause);
        self
    }

    /// Append a message through a shared reference
    pub fn add_message(&self, message: impl Into<String>) -> &Self {
        self.state.write().message.push(message.into());
        self
    }

    /// Append a status through a shared reference
    pub fn add_status(&self, status: u16) -> &Self {
        self.state.write().status.push(Status::new(status));
        self
    }

    /// Attach a cause through a shared reference.
    ///
    /// When a cause is already present both are flattened into a single
    /// [`TextCause`] reading `"<old>; <new>;"`. Passing this very instance
    /// (e.g. through an `Arc`) records a text snapshot of its plain form.
    ///
    /// Causes are formatted without holding the lock; the merge is retried
    /// if another writer replaced the cause in the meantime.
    pub fn add_cause(&self, cause: impl Into<BoxError>) -> &Self {
        let cause: BoxError = cause.into();
        let cause: SharedCause = match super::as_wrapper(cause.as_ref()) {
            Some(wrapper) if std::ptr::eq(wrapper, self) => {
                Arc::new(TextCause(self.to_string()))
            }
            _ => SharedCause::from(cause),
        };

        loop {
            let existing = self.state.read().cause.clone();
            let merged: SharedCause = match &existing {
                None => Arc::clone(&cause),
                Some(existing) => Arc::new(TextCause(format!("{}; {};", existing, cause))),
            };

            let mut state = self.state.write();
            let unchanged = match (&state.cause, &existing) {
                (None, None) => true,
                (Some(current), Some(seen)) => {
                    std::ptr::addr_eq(Arc::as_ptr(current), Arc::as_ptr(seen))
                }
                _ => false,
            };
            if unchanged {
                state.cause = Some(merged);
                return self;
            }
        }
    }

    pub fn codes(&self) -> &[String] {
        &self.code
    }

    /// Codes joined with `"; "`
    pub fn code(&self) -> String {
        self.code.join("; ")
    }

    pub fn messages(&self) -> Vec<String> {
        self.state.read().message.clone()
    }

    /// Messages joined with `"; "`
    pub fn message(&self) -> String {
        self.state.read().message.join("; ")
    }

    pub fn statuses(&self) -> Vec<Status> {
        self.state.read().status.clone()
    }

    /// Statuses in their verbose rendering, e.g. `[{"message": "Not Found", "code": 404}]`
    pub fn status(&self) -> String {
        bracketed(&self.state.read().status, |status| status.to_string())
    }

    pub fn cause(&self) -> Option<SharedCause> {
        self.state.read().cause.clone()
    }

    /// Single-line rendering of every non-empty section, in the order
    /// `code`, `message`, `status`, `cause`.
    ///
    /// Entries are quoted but not escaped.
    pub fn verbose(&self) -> String {
        let state = self.state.read();
        let mut parts = Vec::new();

        if !self.code.is_empty() {
            parts.push(format!("\"code\": {}", quoted_list(&self.code)));
        }
        if !state.message.is_empty() {
            parts.push(format!("\"message\": {}", quoted_list(&state.message)));
        }
        if !state.status.is_empty() {
            let statuses = bracketed(&state.status, |status| status.to_string());
            parts.push(format!("\"status\": {}", statuses));
        }
        if let Some(cause) = &state.cause {
            parts.push(format!("\"cause\": \"{}\"", cause));
        }

        format!("{{{}}}", parts.join(", "))
    }

    /// Decode the verbose form into a map keyed by `code`, `message`, `status`, `cause`
    pub fn try_json(&self) -> Result<Map<String, Value>, DecodeError> {
        Ok(serde_json::from_str(&self.verbose())?)
    }

    /// Map form of the error; an undecodable verbose form is logged and yields an empty map
    pub fn json(&self) -> Map<String, Value> {
        match self.try_json() {
            Ok(map) => map,
            Err(err) => {
                error!(error = %err, input = %self.verbose(), "Failed to decode error map");
                Map::new()
            }
        }
    }

    /// Whether `target` has the same classification.
    ///
    /// Against another [`ErrorWrapper`] the joined codes are compared, otherwise
    /// the plain renderings.
    pub fn is(&self, target: &(dyn StdError + 'static)) -> bool {
        match super::as_wrapper(target) {
            Some(target) => self.code() == target.code(),
            None => self.to_string() == target.to_string(),
        }
    }
}

impl Clone for ErrorWrapper {
    fn clone(&self) -> Self {
        Self {
            code: self.code.clone(),
            state: RwLock::new(self.state.read().clone()),
        }
    }
}

/// Plain form: `cause: [<cause>]; code: [<codes>]`, omitting absent clauses
impl fmt::Display for ErrorWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        let mut parts = Vec::new();

        if let Some(cause) = &state.cause {
            parts.push(format!("cause: [{}]", cause));
        }
        if !self.code.is_empty() {
            parts.push(format!("code: {}", unquoted_list(&self.code)));
        }

        write!(f, "{}", parts.join("; "))
    }
}

impl StdError for ErrorWrapper {}
