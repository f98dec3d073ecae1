//! Optional pre-shared-key guard for the proxy routes.
//!
//! The proxy holds ERP credentials, so when a key is configured every `/api`
//! request must present it. Comparison is constant-time.

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::errors::AppError;

/// Header name for the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Guard function that takes the expected key as a parameter.
pub async fn psk_auth_layer(expected_psk: Option<String>, request: Request, next: Next) -> Response {
    // No key configured: the guard is off
    let Some(expected) = expected_psk else {
        return next.run(request).await;
    };

    let headers = request.headers();
    let verdict = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.strip_prefix("Bearer "))
        })
        .map(|key| constant_time_compare(key, &expected));

    match verdict {
        Some(true) => next.run(request).await,
        Some(false) => AppError::Unauthorized("Invalid API key".to_string()).into_response(),
        None => AppError::Unauthorized("Missing API key".to_string()).into_response(),
    }
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("hr-key-123", "hr-key-123"));
        assert!(!constant_time_compare("hr-key-123", "hr-key-124"));
        assert!(!constant_time_compare("short", "much-longer-key"));
        assert!(!constant_time_compare("", "not-empty"));
    }
}
