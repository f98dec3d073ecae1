//! CRUD operations shared by every resource endpoint.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::{success, ApiResponse, ApiResult};
use crate::errors::AppError;
use crate::odoo::{Domain, OdooError};
use crate::xmlrpc::Value;
use crate::AppState;

/// A remote model listed through `search_read`.
pub struct Listing {
    pub model: &'static str,
    pub fields: &'static [&'static str],
    /// Reported when the fetch fails and the list degrades
    pub failure: &'static str,
}

/// User-facing failure messages for single-record operations.
pub struct Messages {
    pub get: &'static str,
    pub not_found: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

/// A remote model with full CRUD through the proxy.
pub struct Resource {
    pub listing: Listing,
    pub detail_fields: &'static [&'static str],
    /// Body keys that must be present and non-empty on create
    pub required_on_create: &'static [&'static str],
    pub messages: Messages,
}

/// Decode a remote result into a typed value.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, OdooError> {
    serde_json::from_value(JsonValue::from(value))
        .map_err(|e| OdooError::Protocol(format!("unexpected record shape: {}", e)))
}

/// `search_read`; failures degrade to an empty list.
pub async fn list<T>(
    state: &AppState,
    listing: &Listing,
    domain: Domain,
    limit: Option<u32>,
) -> ApiResponse<Vec<T>>
where
    T: DeserializeOwned + Serialize,
{
    let result = state
        .odoo
        .search_read(listing.model, domain, listing.fields, limit)
        .await
        .and_then(decode::<Vec<T>>);

    match result {
        Ok(rows) => {
            tracing::debug!(model = listing.model, count = rows.len(), "Listed records");
            ApiResponse::new(rows)
        }
        Err(e) => {
            tracing::warn!(model = listing.model, "{}: {}", listing.failure, e);
            ApiResponse::degraded(state.config.list_failure_mode, listing.failure)
        }
    }
}

/// `read` of one id; an empty remote list is a 404.
pub async fn get<T>(state: &AppState, resource: &Resource, id: i64) -> ApiResult<T>
where
    T: DeserializeOwned + Serialize,
{
    let rows = state
        .odoo
        .read(resource.listing.model, id, resource.detail_fields)
        .await
        .and_then(decode::<Vec<T>>)
        .map_err(|e| AppError::remote(resource.messages.get, e))?;

    match rows.into_iter().next() {
        Some(record) => success(record),
        None => Err(AppError::NotFound(resource.messages.not_found.to_string())),
    }
}

/// `create`; the remote's answer (the new id) is echoed back.
pub async fn create(
    state: &AppState,
    resource: &Resource,
    payload: Map<String, JsonValue>,
) -> ApiResult<JsonValue> {
    validate_required(resource, &payload)?;

    let result = state
        .odoo
        .create(resource.listing.model, Value::from(JsonValue::Object(payload)))
        .await
        .map_err(|e| AppError::remote(resource.messages.create, e))?;

    tracing::info!(model = resource.listing.model, "Created record {:?}", result);
    success(result.into())
}

/// `write` of a partial payload; the remote's boolean is echoed back.
pub async fn update(
    state: &AppState,
    resource: &Resource,
    id: i64,
    payload: Map<String, JsonValue>,
) -> ApiResult<JsonValue> {
    let result = state
        .odoo
        .write(resource.listing.model, id, Value::from(JsonValue::Object(payload)))
        .await
        .map_err(|e| AppError::remote(resource.messages.update, e))?;

    tracing::info!(model = resource.listing.model, id, "Updated record");
    success(result.into())
}

/// `unlink`; the remote's boolean is echoed back.
pub async fn delete(state: &AppState, resource: &Resource, id: i64) -> ApiResult<JsonValue> {
    let result = state
        .odoo
        .unlink(resource.listing.model, id)
        .await
        .map_err(|e| AppError::remote(resource.messages.delete, e))?;

    tracing::info!(model = resource.listing.model, id, "Deleted record");
    success(result.into())
}

fn validate_required(resource: &Resource, payload: &Map<String, JsonValue>) -> Result<(), AppError> {
    for field in resource.required_on_create {
        let present = match payload.get(*field) {
            None | Some(JsonValue::Null) | Some(JsonValue::Bool(false)) => false,
            Some(JsonValue::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        };
        if !present {
            return Err(AppError::Validation(format!(
                "필수 항목이 누락되었습니다: {}",
                field
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: Resource = Resource {
        listing: Listing {
            model: "hr.department",
            fields: &["id", "name"],
            failure: "list",
        },
        detail_fields: &["id", "name"],
        required_on_create: &["name"],
        messages: Messages {
            get: "get",
            not_found: "not found",
            create: "create",
            update: "update",
            delete: "delete",
        },
    };

    fn payload(value: JsonValue) -> Map<String, JsonValue> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_required_fields() {
        assert!(validate_required(&SAMPLE, &payload(json!({"name": "QA"}))).is_ok());
        assert!(matches!(
            validate_required(&SAMPLE, &payload(json!({"name": "  "}))),
            Err(AppError::Validation(_))
        ));
        assert!(validate_required(&SAMPLE, &payload(json!({}))).is_err());
    }

    #[test]
    fn test_decode_reports_shape_errors() {
        let err = decode::<Vec<crate::models::Department>>(Value::Int(3)).unwrap_err();
        assert!(matches!(err, OdooError::Protocol(_)));
    }
}
