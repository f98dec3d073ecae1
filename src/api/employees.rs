//! Employee API endpoints.

use axum::extract::State;
use serde_json::{Map, Value as JsonValue};

use super::extract::{Json, Path, Query};
use super::resource::{self, Listing, Messages, Resource};
use super::{ApiResponse, ApiResult, ListQuery};
use crate::models::{Employee, EMPLOYEE_DETAIL_FIELDS, EMPLOYEE_LIST_FIELDS};
use crate::odoo::Domain;
use crate::AppState;

const EMPLOYEES: Resource = Resource {
    listing: Listing {
        model: "hr.employee",
        fields: EMPLOYEE_LIST_FIELDS,
        failure: "직원 데이터 조회 실패",
    },
    detail_fields: EMPLOYEE_DETAIL_FIELDS,
    required_on_create: &["name"],
    messages: Messages {
        get: "직원 상세 정보 조회 실패",
        not_found: "직원을 찾을 수 없습니다.",
        create: "직원 생성 실패",
        update: "직원 수정 실패",
        delete: "직원 삭제 실패",
    },
};

/// GET /api/odoo/employees - List employees.
pub async fn list_employees(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResponse<Vec<Employee>> {
    resource::list(&state, &EMPLOYEES.listing, Domain::all(), query.limit).await
}

/// GET /api/odoo/employees/{id} - Get a single employee.
pub async fn get_employee(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Employee> {
    resource::get(&state, &EMPLOYEES, id).await
}

/// POST /api/odoo/employees - Create an employee, answering with its id.
pub async fn create_employee(
    State(state): State<AppState>,
    Json(payload): Json<Map<String, JsonValue>>,
) -> ApiResult<JsonValue> {
    resource::create(&state, &EMPLOYEES, payload).await
}

/// PUT /api/odoo/employees/{id} - Update an employee.
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<Map<String, JsonValue>>,
) -> ApiResult<JsonValue> {
    resource::update(&state, &EMPLOYEES, id, payload).await
}

/// DELETE /api/odoo/employees/{id} - Delete an employee.
pub async fn delete_employee(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<JsonValue> {
    resource::delete(&state, &EMPLOYEES, id).await
}
