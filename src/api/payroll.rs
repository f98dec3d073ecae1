//! Payroll API endpoints.
//!
//! Listing under `/payroll` returns payslips; the per-id operations and
//! creation act on the underlying employment contracts.

use axum::extract::State;
use serde_json::{Map, Value as JsonValue};

use super::extract::{Json, Path, Query};
use super::resource::{self, Listing, Messages, Resource};
use super::{ApiResponse, ApiResult, ListQuery};
use crate::models::{Contract, Payslip, CONTRACT_FIELDS, PAYSLIP_FIELDS};
use crate::odoo::Domain;
use crate::AppState;

const DEFAULT_LIMIT: u32 = 20;

const CONTRACTS: Resource = Resource {
    listing: Listing {
        model: "hr.contract",
        fields: CONTRACT_FIELDS,
        failure: "근로계약 데이터 조회 실패",
    },
    detail_fields: CONTRACT_FIELDS,
    required_on_create: &["employee_id"],
    messages: Messages {
        get: "급여 계약 조회 실패",
        not_found: "급여 계약을 찾을 수 없습니다.",
        create: "급여 계약 생성 실패",
        update: "급여 계약 수정 실패",
        delete: "급여 계약 삭제 실패",
    },
};

const PAYSLIPS: Listing = Listing {
    model: "hr.payslip",
    fields: PAYSLIP_FIELDS,
    failure: "급여 정보 조회 실패",
};

fn filter(query: &ListQuery) -> (Domain, Option<u32>) {
    (
        Domain::all().eq_opt("employee_id", query.employee_id),
        Some(query.limit.unwrap_or(DEFAULT_LIMIT)),
    )
}

/// GET /api/odoo/contracts?employeeId=&limit= - List employment contracts.
pub async fn list_contracts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResponse<Vec<Contract>> {
    let (domain, limit) = filter(&query);
    resource::list(&state, &CONTRACTS.listing, domain, limit).await
}

/// GET /api/odoo/payroll?employeeId=&limit= - List payslips.
pub async fn list_payslips(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResponse<Vec<Payslip>> {
    let (domain, limit) = filter(&query);
    resource::list(&state, &PAYSLIPS, domain, limit).await
}

/// GET /api/odoo/payroll/{id} - Get a single contract.
pub async fn get_contract(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Contract> {
    resource::get(&state, &CONTRACTS, id).await
}

/// POST /api/odoo/payroll - Create a contract.
pub async fn create_contract(
    State(state): State<AppState>,
    Json(payload): Json<Map<String, JsonValue>>,
) -> ApiResult<JsonValue> {
    resource::create(&state, &CONTRACTS, payload).await
}

/// PUT /api/odoo/payroll/{id} - Update a contract.
pub async fn update_contract(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<Map<String, JsonValue>>,
) -> ApiResult<JsonValue> {
    resource::update(&state, &CONTRACTS, id, payload).await
}

/// DELETE /api/odoo/payroll/{id} - Delete a contract.
pub async fn delete_contract(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<JsonValue> {
    resource::delete(&state, &CONTRACTS, id).await
}
