//! Job position API endpoints.

use axum::extract::State;

use super::resource::{self, Listing};
use super::ApiResponse;
use crate::models::{Job, JOB_FIELDS};
use crate::odoo::Domain;
use crate::AppState;

const JOBS: Listing = Listing {
    model: "hr.job",
    fields: JOB_FIELDS,
    failure: "직무 데이터 조회 실패",
};

/// GET /api/odoo/jobs - List active job positions.
pub async fn list_jobs(State(state): State<AppState>) -> ApiResponse<Vec<Job>> {
    let domain = Domain::all().eq("active", true);
    resource::list(&state, &JOBS, domain, None).await
}
