//! Application error type.
//!
//! Every fallible handler returns [`AppError`], which renders as
//! `{ "success": false, "message": ..., "errors"?: [...] }`.
//!
//! Server errors (5xx) never leak their internal text: the real error is
//! logged and the client receives a generic message.

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

/// Message returned for every 5xx response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong, please try again later";

/// Message returned by [`AppError::validation`].
pub const VALIDATION_ERROR_MESSAGE: &str = "Validation failed";

/// A single violated constraint, addressed by its field path in the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub field_errors: Vec<FieldError>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            field_errors: Vec::new(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::internal(anyhow!(message.into()))
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow!(message.into()))
    }

    /// 400 carrying one entry per violated field.
    pub fn validation(field_errors: Vec<FieldError>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: anyhow!(VALIDATION_ERROR_MESSAGE),
            field_errors,
        }
    }

    /// Shorthand for a validation failure on a single field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::validation(vec![FieldError::new(field, message)])
    }

    /// The message the client will see.
    pub fn public_message(&self) -> String {
        if self.status.is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.error.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status.as_u16(),
                error = ?self.error,
                "Request failed with server error"
            );
        }

        let mut body = json!({
            "success": false,
            "message": self.public_message(),
        });

        if !self.field_errors.is_empty() {
            body["errors"] = json!(self.field_errors);
        }

        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unauthorized_body_shape() {
        let response = AppError::unauthorized("Not authorized").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Not authorized");
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_forbidden_is_distinct_from_unauthorized() {
        let response = AppError::forbidden("Access denied").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response =
            AppError::internal(anyhow!("connection refused to 10.0.0.3:5432")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
        assert!(!body.to_string().contains("10.0.0.3"));
    }

    #[tokio::test]
    async fn test_validation_error_lists_fields() {
        let response = AppError::validation(vec![
            FieldError::new("email", "Email must be a valid email address"),
            FieldError::new("name", "Name is required"),
        ])
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["message"], VALIDATION_ERROR_MESSAGE);
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
        assert_eq!(body["errors"][0]["field"], "email");
    }

    #[test]
    fn test_from_any_error_is_internal() {
        let err: AppError = std::io::Error::other("disk full").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);
    }
}
