//! Attendance API endpoints.

use axum::extract::State;

use super::extract::Query;
use super::resource::{self, Listing};
use super::{ApiResponse, ListQuery};
use crate::models::{Attendance, ATTENDANCE_FIELDS};
use crate::odoo::Domain;
use crate::AppState;

const DEFAULT_LIMIT: u32 = 50;

const ATTENDANCES: Listing = Listing {
    model: "hr.attendance",
    fields: ATTENDANCE_FIELDS,
    failure: "근태 정보 조회 실패",
};

/// GET /api/odoo/attendance?employeeId=&limit= - List attendance records.
pub async fn list_attendances(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResponse<Vec<Attendance>> {
    let domain = Domain::all().eq_opt("employee_id", query.employee_id);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    resource::list(&state, &ATTENDANCES, domain, Some(limit)).await
}
