//! Error handling module for the HR proxy.
//!
//! Provides the handler error type with its mapping to HTTP status codes and
//! the `{success: false, error, details}` envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Missing or wrong API key
    Unauthorized(String),
    /// A single-id lookup found nothing
    NotFound(String),
    /// Request body failed validation
    Validation(String),
    /// Authentication, transport or remote application failure
    Remote { message: String, details: String },
}

impl AppError {
    /// Wrap a remote failure under a user-facing message.
    pub fn remote(message: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        AppError::Remote {
            message: message.into(),
            details: cause.to_string(),
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Remote { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        match self {
            AppError::Unauthorized(msg) => msg,
            AppError::NotFound(msg) => msg,
            AppError::Validation(msg) => msg,
            AppError::Remote { message, .. } => message,
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            AppError::Remote { details, .. } => Some(details),
            _ => None,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.details() {
            Some(details) => write!(f, "{}: {}", self.message(), details),
            None => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for AppError {}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            success: false,
            error: error.message().to_string(),
            details: error.details().map(str::to_string),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Remote { message, details } = &self {
            tracing::error!("{}: {}", message, details);
        }
        let status = self.status_code();
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::remote("부서 수정 실패", "timeout").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Validation("name".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_envelope_has_no_details() {
        let body = ErrorResponse::from(&AppError::NotFound("직원을 찾을 수 없습니다.".into()));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"success": false, "error": "직원을 찾을 수 없습니다."})
        );
    }

    #[test]
    fn test_remote_envelope_carries_details() {
        let err = AppError::remote("직원 생성 실패", "remote error 1: bad value");
        let body = ErrorResponse::from(&err);
        assert_eq!(body.details.as_deref(), Some("remote error 1: bad value"));
        assert_eq!(err.to_string(), "직원 생성 실패: remote error 1: bad value");
    }
}
