//! Aggregates shown on the dashboard and the connection check.

use serde::{Deserialize, Serialize};

use super::fields::falsy;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_employees: i64,
    pub total_departments: i64,
    /// Distinct employees who checked in today
    pub today_attendances: usize,
    /// Distinct employees on validated leave today
    pub today_leaves: usize,
}

pub const USER_FIELDS: &[&str] = &["id", "name", "login", "email"];

/// The ERP account the proxy authenticates as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErpUser {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub uid: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ErpUser>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stats_use_camel_case() {
        let stats = DashboardStats {
            total_employees: 12,
            total_departments: 3,
            today_attendances: 9,
            today_leaves: 1,
        };
        assert_eq!(
            serde_json::to_value(&stats).unwrap(),
            json!({
                "totalEmployees": 12,
                "totalDepartments": 3,
                "todayAttendances": 9,
                "todayLeaves": 1
            })
        );
    }
}
