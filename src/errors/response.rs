use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use tracing::debug;

use super::status::Status;
use super::wrapper::ErrorWrapper;

impl ErrorWrapper {
    /// HTTP status for a response: the latest valid status, or 500
    pub fn http_status(&self) -> StatusCode {
        self.statuses()
            .iter()
            .rev()
            .find_map(Status::http_status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Response body built from the error's state, so quotes, backslashes and
    /// newlines in messages or causes survive.
    pub fn response_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("code".to_string(), json!(self.codes()));

        let messages = self.messages();
        if !messages.is_empty() {
            body.insert("message".to_string(), json!(messages));
        }
        let statuses = self.statuses();
        if !statuses.is_empty() {
            body.insert("status".to_string(), json!(statuses));
        }
        if let Some(cause) = self.cause() {
            body.insert("cause".to_string(), Value::String(cause.to_string()));
        }

        Value::Object(body)
    }
}

impl IntoResponse for ErrorWrapper {
    fn into_response(self) -> Response {
        let status = self.http_status();
        debug!(code = %self.code(), status = %status.as_u16(), "Rendering error response");

        (status, Json(self.response_body())).into_response()
    }
}
