//! Job position record (`hr.job`).

use serde::{Deserialize, Serialize};

use super::fields::{falsy, RefPair};

pub const JOB_FIELDS: &[&str] = &["id", "name", "description", "department_id"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub department_id: Option<RefPair>,
}
