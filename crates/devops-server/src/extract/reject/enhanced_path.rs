//! Path parameter extractor with JSON error envelopes.

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path as AxumPath};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut};
use serde::de::DeserializeOwned;

use super::sanitize_error_message;
use crate::handler::{Error, ErrorKind};

/// Drop-in for [`axum::extract::Path`].
///
/// A segment that does not deserialize is the caller's fault and becomes a
/// `400`. Any other rejection means the route and the extractor disagree,
/// which is reported as a `500`.
#[derive(Debug, Clone, Copy, Deref, DerefMut)]
pub struct Path<T>(pub T);

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AxumPath::<T>::from_request_parts(parts, state).await {
            Ok(AxumPath(params)) => Ok(Self(params)),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        let detail = sanitize_error_message(&rejection.body_text(), 2, 150);

        match rejection {
            PathRejection::FailedToDeserializePathParams(_) => ErrorKind::BadRequest
                .with_message("Invalid path parameter")
                .with_context(detail),
            _ => ErrorKind::InternalServerError
                .with_message("Path processing failed")
                .with_context(detail),
        }
    }
}

impl<T> aide::OperationInput for Path<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        AxumPath::<T>::operation_input(ctx, operation);
    }
}
