//! Service error to HTTP error conversion.
//!
//! This is the fixed table between service-level failures and HTTP statuses.

use super::http_error::{Error as HttpError, ErrorKind};
use crate::{Error as ServiceError, ErrorKind as ServiceErrorKind};

/// Tracing target for service error conversions.
const TRACING_TARGET: &str = "devops_server::handler::service";

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error.kind() {
            ServiceErrorKind::Unavailable => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    service = ?error.service(),
                    "Collaborator not available"
                );
            }
            ServiceErrorKind::External => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    service = ?error.service(),
                    "Collaborator call failed"
                );
            }
            ServiceErrorKind::Config | ServiceErrorKind::Internal => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    error_kind = %error.kind(),
                    "Service operation failed"
                );
            }
        }

        let kind = match error.kind() {
            ServiceErrorKind::Unavailable => ErrorKind::ServiceUnavailable,
            ServiceErrorKind::External | ServiceErrorKind::Config | ServiceErrorKind::Internal => {
                ErrorKind::InternalServerError
            }
        };

        let mut http_error = kind.with_message(error.message().to_owned());
        if let Some(service) = error.service() {
            http_error = http_error.with_context(format!("service: {service}"));
        }

        http_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_maps_to_503() {
        let error = HttpError::from(ServiceError::unavailable("redis", "Redis not available"));
        assert_eq!(error.kind(), ErrorKind::ServiceUnavailable);
        assert_eq!(error.message(), Some("Redis not available"));
    }

    #[test]
    fn external_maps_to_500_with_cause() {
        let error = HttpError::from(ServiceError::external("redis", "Connection refused"));
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.message(), Some("Connection refused"));
        assert_eq!(error.context(), Some("service: redis"));
    }

    #[test]
    fn internal_maps_to_500() {
        let error = HttpError::from(ServiceError::internal("unexpected state"));
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.context(), None);
    }
}
