//! Payroll records: employment contracts (`hr.contract`) and payslips (`hr.payslip`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fields::{falsy, RefPair};

pub const CONTRACT_FIELDS: &[&str] = &[
    "id",
    "name",
    "employee_id",
    "department_id",
    "job_id",
    "date_start",
    "date_end",
    "wage",
    "state",
];

pub const PAYSLIP_FIELDS: &[&str] = &["id", "employee_id", "date_from", "date_to", "state", "number"];

/// Contract lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractState {
    Draft,
    Open,
    Close,
    Cancel,
    #[serde(other)]
    Other,
}

/// Payslip lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayslipState {
    Draft,
    Verify,
    Done,
    Paid,
    Cancel,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: i64,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<RefPair>,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub department_id: Option<RefPair>,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub job_id: Option<RefPair>,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub date_start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub date_end: Option<NaiveDate>,
    #[serde(default)]
    pub wage: f64,
    pub state: ContractState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    pub id: i64,
    pub employee_id: RefPair,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    pub state: PayslipState,
}
