//! Dashboard statistics endpoint.

use std::collections::HashSet;

use axum::extract::State;
use chrono::{NaiveDate, Utc};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::DashboardStats;
use crate::odoo::Domain;
use crate::AppState;

const STATS_FAILED: &str = "통계 데이터 조회 실패";

/// GET /api/odoo/stats - Headcounts plus today's attendance and leave.
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<DashboardStats> {
    let total_employees = state
        .odoo
        .search_count("hr.employee", Domain::all())
        .await
        .map_err(|e| AppError::remote(STATS_FAILED, e))?;

    let total_departments = state
        .odoo
        .search_count("hr.department", Domain::all())
        .await
        .map_err(|e| AppError::remote(STATS_FAILED, e))?;

    // Remote timestamps are stored in UTC
    let (day_start, day_end) = day_bounds(Utc::now().date_naive());

    let today_attendances = distinct_employees(
        &state,
        "hr.attendance",
        Domain::all().ge("check_in", day_start.as_str()),
    )
    .await;

    let today_leaves = distinct_employees(
        &state,
        "hr.leave",
        Domain::all()
            .ge("date_from", day_start.as_str())
            .le("date_to", day_end.as_str())
            .eq("state", "validate"),
    )
    .await;

    success(DashboardStats {
        total_employees,
        total_departments,
        today_attendances,
        today_leaves,
    })
}

fn day_bounds(day: NaiveDate) -> (String, String) {
    (format!("{} 00:00:00", day), format!("{} 23:59:59", day))
}

/// Count distinct `employee_id`s matching the domain; failures count as zero.
async fn distinct_employees(state: &AppState, model: &str, domain: Domain) -> usize {
    let rows = match state.odoo.search_read(model, domain, &["employee_id"], None).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(model, "Counting today's records failed: {}", e);
            return 0;
        }
    };

    rows.as_array()
        .unwrap_or_default()
        .iter()
        .filter_map(|row| row.get("employee_id")?.as_array()?.first()?.as_i64())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_bounds() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(
            day_bounds(day),
            (
                "2024-05-01 00:00:00".to_string(),
                "2024-05-01 23:59:59".to_string()
            )
        );
    }
}
