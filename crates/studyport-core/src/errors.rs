//! Application error type with HTTP response conversion.
//!
//! Every rejection in the request pipeline flows through [`AppError`]. The
//! response body is always `{"message": ...}` plus an optional machine
//! readable `"code"` that clients branch on (subscription denials rely on
//! this). Internal detail stays server-side: callers of [`AppError::database`]
//! get a generic message while the underlying error is logged in full.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub code: Option<&'static str>,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(status: StatusCode, message: impl Into<String>, code: &'static str) -> Self {
        Self {
            status,
            message: message.into(),
            code: Some(code),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Wrap a store error. The caller sees a generic message; the real error
    /// is logged here with full detail.
    pub fn database<E: std::fmt::Display>(err: E) -> Self {
        tracing::error!(error = %err, "database error");
        Self::internal_error("Internal server error")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut body = json!({ "message": self.message });
        if let Some(code) = self.code {
            body["code"] = json!(code);
        }

        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_status() {
        assert_eq!(
            AppError::unauthorized("no").status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::forbidden("no").status, StatusCode::FORBIDDEN);
        assert_eq!(AppError::not_found("no").status, StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::internal_error("no").status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_code_defaults_to_none() {
        assert!(AppError::forbidden("no").code.is_none());
    }

    #[test]
    fn test_with_code_carries_code() {
        let err = AppError::with_code(StatusCode::FORBIDDEN, "denied", "NO_SUBSCRIPTION");
        assert_eq!(err.code, Some("NO_SUBSCRIPTION"));
    }

    #[test]
    fn test_database_error_is_generic() {
        let err = AppError::database("connection refused on 10.0.0.3:5432");
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal server error");
    }
}
