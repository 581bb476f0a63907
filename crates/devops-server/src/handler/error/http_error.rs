//! Request failures and the table that turns them into responses.
//!
//! A handler, extractor or middleware fails with an [`Error`]. Its [`ErrorKind`]
//! picks the status code and default message through [`ErrorKind::response`];
//! nothing else in the crate chooses an error status.

use std::borrow::Cow;
use std::fmt;

use axum::response::{IntoResponse, Response};

use crate::handler::response::ErrorResponse;

type Text = Cow<'static, str>;

/// A failed request, rendered as an `{ "error": ... }` envelope.
#[derive(Debug, Clone)]
#[must_use = "errors do nothing unless returned from a handler"]
pub struct Error {
    kind: ErrorKind,
    message: Option<Text>,
    context: Option<Text>,
    suggestion: Option<Text>,
}

impl Error {
    /// Creates an error that reports the default message of `kind`.
    pub const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            context: None,
            suggestion: None,
        }
    }

    /// Replaces the message sent to the client.
    pub fn with_message(mut self, message: impl Into<Text>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attaches detail that is logged but never sent to the client.
    pub fn with_context(mut self, context: impl Into<Text>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Attaches a hint that is sent next to the message.
    pub fn with_suggestion(mut self, suggestion: impl Into<Text>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Returns the message the client will see.
    pub fn message(&self) -> &str {
        match &self.message {
            Some(message) => message.as_ref(),
            None => self.kind.default_message(),
        }
    }

    /// Builds the envelope for this error.
    pub fn into_error_response(self) -> ErrorResponse {
        let mut response = self.kind.response();
        if let Some(message) = self.message {
            response = response.with_message(message);
        }
        if let Some(suggestion) = self.suggestion {
            response = response.with_suggestion(suggestion);
        }
        if let Some(context) = self.context {
            response = response.with_context(context);
        }
        response
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.kind.response().status;
        write!(f, "{status}: {}", self.message())?;
        if let Some(context) = &self.context {
            write!(f, " ({context})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    #[inline]
    fn into_response(self) -> Response {
        self.into_error_response().into_response()
    }
}

impl aide::OperationOutput for Error {
    type Inner = ErrorResponse;
}

/// Handler result whose failures render as JSON envelopes.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every error status the server sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Body or path could not be parsed.
    BadRequest,
    /// Unknown key or route.
    NotFound,
    /// The route exists but not for this method.
    MethodNotAllowed,
    /// A collaborator call, a timeout or a panic.
    InternalServerError,
    /// A required collaborator is not connected.
    ServiceUnavailable,
}

impl ErrorKind {
    /// Shorthand for `Error::new(self).with_message(message)`.
    pub fn with_message(self, message: impl Into<Text>) -> Error {
        Error::new(self).with_message(message)
    }

    /// Returns the default envelope, status included.
    pub fn response(self) -> ErrorResponse {
        match self {
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::MethodNotAllowed => ErrorResponse::METHOD_NOT_ALLOWED,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => ErrorResponse::SERVICE_UNAVAILABLE,
        }
    }

    fn default_message(self) -> &'static str {
        match self.response().message {
            Cow::Borrowed(message) => message,
            Cow::Owned(_) => "",
        }
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.response().into_response()
    }
}
