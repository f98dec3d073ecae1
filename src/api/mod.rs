//! REST API module.
//!
//! One handler per proxy endpoint. Every handler maps the inbound request to
//! a fixed model and remote method, then wraps the outcome in the
//! `{success, data}` envelope.

mod attendance;
mod connection;
mod departments;
mod employees;
mod extract;
mod jobs;
mod payroll;
mod resource;
mod stats;

pub use attendance::*;
pub use connection::*;
pub use departments::*;
pub use employees::*;
pub use jobs::*;
pub use payroll::*;
pub use stats::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::config::ListFailureMode;
use crate::errors::AppError;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    /// Set when a list fetch failed and `data` was replaced by an empty list
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            degraded: false,
            error: None,
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// An empty list standing in for a failed fetch.
    pub fn degraded(mode: ListFailureMode, message: &str) -> Self {
        match mode {
            ListFailureMode::Compat => Self::new(Vec::new()),
            ListFailureMode::Tagged => Self {
                success: true,
                data: Vec::new(),
                degraded: true,
                error: Some(message.to_string()),
            },
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data))
}

/// Filter and limit accepted by list endpoints.
///
/// An empty parameter (`?employeeId=`) means "not given".
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub employee_id: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub limit: Option<u32>,
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(de::Error::custom),
    }
}
