//! Department API endpoints.

use axum::extract::State;
use serde_json::{Map, Value as JsonValue};

use super::extract::{Json, Path};
use super::resource::{self, Listing, Messages, Resource};
use super::{ApiResponse, ApiResult};
use crate::models::{Department, DEPARTMENT_FIELDS};
use crate::odoo::Domain;
use crate::AppState;

const DEPARTMENTS: Resource = Resource {
    listing: Listing {
        model: "hr.department",
        fields: DEPARTMENT_FIELDS,
        failure: "부서 데이터 조회 실패",
    },
    detail_fields: DEPARTMENT_FIELDS,
    required_on_create: &["name"],
    messages: Messages {
        get: "부서 상세 정보 조회 실패",
        not_found: "부서를 찾을 수 없습니다.",
        create: "부서 생성 실패",
        update: "부서 수정 실패",
        delete: "부서 삭제 실패",
    },
};

/// GET /api/odoo/departments - List all departments.
pub async fn list_departments(State(state): State<AppState>) -> ApiResponse<Vec<Department>> {
    resource::list(&state, &DEPARTMENTS.listing, Domain::all(), None).await
}

/// GET /api/odoo/departments/{id} - Get a single department.
pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Department> {
    resource::get(&state, &DEPARTMENTS, id).await
}

/// POST /api/odoo/departments - Create a department.
pub async fn create_department(
    State(state): State<AppState>,
    Json(payload): Json<Map<String, JsonValue>>,
) -> ApiResult<JsonValue> {
    resource::create(&state, &DEPARTMENTS, payload).await
}

/// PUT /api/odoo/departments/{id} - Update a department.
pub async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<Map<String, JsonValue>>,
) -> ApiResult<JsonValue> {
    resource::update(&state, &DEPARTMENTS, id, payload).await
}

/// DELETE /api/odoo/departments/{id} - Delete a department.
pub async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<JsonValue> {
    resource::delete(&state, &DEPARTMENTS, id).await
}
