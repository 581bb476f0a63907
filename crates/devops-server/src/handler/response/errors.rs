use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use schemars::JsonSchema;
use serde::Serialize;

const TRACING_TARGET: &str = "devops_server::handler::response";

type Text = Cow<'static, str>;

/// Body of every error response: `{ "error": <message> }`, plus an optional
/// `suggestion`.
///
/// `name`, `status` and `context` only reach the logs.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ErrorResponse {
    /// Message safe to show to the caller.
    #[serde(rename = "error")]
    pub message: Text,
    /// How the caller can fix the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Text>,

    #[serde(skip)]
    pub name: &'static str,
    #[serde(skip)]
    pub context: Option<Text>,
    #[serde(skip)]
    pub status: StatusCode,
}

impl ErrorResponse {
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "Invalid request data",
        StatusCode::BAD_REQUEST,
    );
    pub const NOT_FOUND: Self =
        Self::new("not_found", "Resource not found", StatusCode::NOT_FOUND);
    pub const METHOD_NOT_ALLOWED: Self = Self::new(
        "method_not_allowed",
        "Method not allowed",
        StatusCode::METHOD_NOT_ALLOWED,
    );
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "Internal server error",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const SERVICE_UNAVAILABLE: Self = Self::new(
        "service_unavailable",
        "Service unavailable",
        StatusCode::SERVICE_UNAVAILABLE,
    );

    const fn new(name: &'static str, message: &'static str, status: StatusCode) -> Self {
        Self {
            message: Cow::Borrowed(message),
            suggestion: None,
            name,
            context: None,
            status,
        }
    }

    pub fn with_message(self, message: impl Into<Text>) -> Self {
        Self {
            message: message.into(),
            ..self
        }
    }

    pub fn with_suggestion(self, suggestion: impl Into<Text>) -> Self {
        Self {
            suggestion: Some(suggestion.into()),
            ..self
        }
    }

    pub fn with_context(self, context: impl Into<Text>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        tracing::warn!(
            target: TRACING_TARGET,
            status = self.status.as_u16(),
            name = self.name,
            message = %self.message,
            context = self.context.as_deref(),
            "Sending error response"
        );
        (self.status, Json(self)).into_response()
    }
}
