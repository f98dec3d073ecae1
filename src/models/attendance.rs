//! Attendance record (`hr.attendance`).

use serde::{Deserialize, Serialize};

use super::fields::{falsy, OdooDateTime, RefPair};

pub const ATTENDANCE_FIELDS: &[&str] = &["id", "employee_id", "check_in", "check_out", "worked_hours"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: i64,
    pub employee_id: RefPair,
    pub check_in: OdooDateTime,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub check_out: Option<OdooDateTime>,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub worked_hours: Option<f64>,
}
