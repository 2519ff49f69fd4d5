//! Application error type.
//!
//! Every fallible handler and service returns [`AppError`], which pairs an HTTP
//! status with an [`anyhow::Error`] and renders as `{"error": "<message>"}`.
//!
//! | Constructor | Status |
//! |---|---|
//! | [`AppError::unauthorized`] | 401 |
//! | [`AppError::forbidden`] | 403 |
//! | [`AppError::validation`] | 400 |
//! | [`AppError::not_found`] | 404 |
//! | [`AppError::conflict`] | 409 |
//! | [`AppError::internal`] / [`AppError::internal_error`] / [`AppError::database`] | 500 |
//!
//! Server errors are logged with their cause and answered with a generic message.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, anyhow::anyhow!(message.into()))
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::message(StatusCode::INTERNAL_SERVER_ERROR, message)
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

    pub fn validation(message: impl Into<String>) -> Self {
        Self::message(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::message(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::message(StatusCode::FORBIDDEN, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::message(StatusCode::CONFLICT, message)
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.is_server_error() {
            tracing::error!(status = %self.status, error = ?self.error, "Request failed");
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        };

        let body = Json(json!({ "error": message }));

        (self.status, body).into_response()
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
    use axum::body::to_bytes;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_constructors_set_status() {
        assert_eq!(AppError::unauthorized("x").status, StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::forbidden("x").status, StatusCode::FORBIDDEN);
        assert_eq!(AppError::validation("x").status, StatusCode::BAD_REQUEST);
        assert_eq!(AppError::conflict("x").status, StatusCode::CONFLICT);
        assert_eq!(
            AppError::not_found(anyhow::anyhow!("x")).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::internal_error("x").status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_std_error_is_internal() {
        let io = std::io::Error::other("disk on fire");
        let err: AppError = io.into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_display_includes_status_and_message() {
        let err = AppError::conflict("Username already exists");
        assert_eq!(err.to_string(), "409 Conflict: Username already exists");
    }

    #[tokio::test]
    async fn test_client_error_renders_message() {
        let (status, body) = body_json(AppError::conflict("Email already exists")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Email already exists");
    }

    #[tokio::test]
    async fn test_server_error_hides_cause() {
        let (status, body) =
            body_json(AppError::internal(anyhow::anyhow!("connection refused"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }
}
