//! Errors raised while building or calling the collaborators.
//!
//! Collaborator-facing calls return [`Result`] instead of failing implicitly.
//! The [`ErrorKind`] of an error decides which HTTP status it becomes at the
//! handler boundary.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

pub type BoxedError = Box<dyn StdError + Send + Sync>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Which way a collaborator call went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Invalid configuration values.
    Config,
    /// A collaborator handle was never established.
    Unavailable,
    /// A call to an established collaborator failed.
    External,
    /// A bug or panic inside this process.
    Internal,
}

impl ErrorKind {
    /// Snake-case name used in log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure carrying its kind, the collaborator name and the cause.
#[derive(Debug, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct Error {
    kind: ErrorKind,
    /// Name of the collaborator involved, if any.
    service: Option<Cow<'static, str>>,
    message: Cow<'static, str>,
    #[source]
    source: Option<BoxedError>,
}

impl Error {
    #[inline]
    fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            service: None,
            message: message.into(),
            source: None,
        }
    }

    #[inline]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Attaches the name of the collaborator involved.
    #[inline]
    pub fn with_service(mut self, service: impl Into<Cow<'static, str>>) -> Self {
        self.service = Some(service.into());
        self
    }

    #[must_use]
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// For [`ErrorKind::External`] this is the stringified cause reported by the
    /// collaborator.
    #[must_use]
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// `"redis"` or `"postgres"` for collaborator failures.
    #[must_use]
    #[inline]
    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    /// Settings rejected before the collaborator was contacted.
    #[inline]
    pub fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    /// Creates an error for a collaborator that was never established.
    #[inline]
    pub fn unavailable(
        service: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Unavailable, message).with_service(service)
    }

    /// Creates an error for a failed collaborator call.
    #[inline]
    pub fn external(
        service: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::External, message).with_service(service)
    }

    #[inline]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_names() {
        assert_eq!(ErrorKind::Config.as_str(), "config");
        assert_eq!(ErrorKind::Unavailable.as_str(), "unavailable");
        assert_eq!(ErrorKind::External.as_str(), "external");
        assert_eq!(ErrorKind::Internal.as_str(), "internal");
    }

    #[test]
    fn external_error_keeps_cause_as_message() {
        let error = Error::external("redis", "Connection refused (os error 111)");
        assert_eq!(error.kind(), ErrorKind::External);
        assert_eq!(error.service(), Some("redis"));
        assert_eq!(error.message(), "Connection refused (os error 111)");
        assert_eq!(
            error.to_string(),
            "external error: Connection refused (os error 111)"
        );
    }

    #[test]
    fn source_is_chained() {
        let io = std::io::Error::other("boom");
        let error = Error::internal("wrapped").with_source(io);
        assert!(StdError::source(&error).is_some());
    }
}
