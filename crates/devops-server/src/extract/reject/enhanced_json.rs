//! JSON extractor with JSON error envelopes.
//!
//! This module provides [`Json`], a wrapper around [`axum::Json`] that turns
//! rejections into `400 Bad Request` responses and delegates OpenAPI
//! documentation to the wrapped extractor.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json as AxumJson, Request};
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, DerefMut};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::sanitize_error_message;
use crate::handler::{Error, ErrorKind};

/// JSON extractor and response wrapper.
///
/// Malformed bodies, missing `Content-Type` headers and schema mismatches are
/// all reported as [`ErrorKind::BadRequest`].
///
/// [`Json`]: AxumJson
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut)]
pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let extractor = <AxumJson<T> as FromRequest<S>>::from_request(req, state).await;
        extractor.map(|x| Self(x.0)).map_err(Into::into)
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    #[inline]
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        let detail = |text: String| sanitize_error_message(&text, 3, 200);
        match rejection {
            JsonRejection::JsonSyntaxError(syntax) => ErrorKind::BadRequest
                .with_message("Request body is not valid JSON")
                .with_context(detail(syntax.body_text()))
                .with_suggestion("Send a well-formed JSON document"),
            JsonRejection::JsonDataError(data) => ErrorKind::BadRequest
                .with_message("Request body has the wrong shape")
                .with_context(detail(data.body_text())),
            JsonRejection::MissingJsonContentType(_) => ErrorKind::BadRequest
                .with_message("Expected a JSON request body")
                .with_suggestion("Set the header Content-Type: application/json"),
            JsonRejection::BytesRejection(bytes) => ErrorKind::BadRequest
                .with_message("Request body could not be read")
                .with_context(detail(bytes.body_text())),
            other => ErrorKind::InternalServerError
                .with_message("Request body could not be processed")
                .with_context(format!("{other:?}")),
        }
    }
}

impl<T> aide::OperationInput for Json<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        AxumJson::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AxumJson::<T>::inferred_early_responses(ctx, operation)
    }
}

impl<T> aide::OperationOutput for Json<T>
where
    T: schemars::JsonSchema + Serialize,
{
    type Inner = T;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        AxumJson::<T>::operation_response(ctx, operation)
    }

    fn inferred_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AxumJson::<T>::inferred_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Router, body::Body, http::Request as HttpRequest};
    use tower::ServiceExt;

    use super::*;

    async fn echo(Json(value): Json<serde_json::Value>) -> Json<serde_json::Value> {
        Json(value)
    }

    fn router() -> Router {
        Router::new().route("/", post(echo))
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() -> anyhow::Result<()> {
        let request = HttpRequest::post("/")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))?;

        let response = router().oneshot(request).await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn missing_content_type_is_bad_request() -> anyhow::Result<()> {
        let request = HttpRequest::post("/").body(Body::from("{}"))?;

        let response = router().oneshot(request).await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn valid_body_passes_through() -> anyhow::Result<()> {
        let request = HttpRequest::post("/")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"a":1}"#))?;

        let response = router().oneshot(request).await?;
        assert_eq!(response.status(), StatusCode::OK);
        Ok(())
    }
}
