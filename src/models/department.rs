//! Department record (`hr.department`).

use serde::{Deserialize, Serialize};

use super::fields::{falsy, RefPair};

pub const DEPARTMENT_FIELDS: &[&str] = &[
    "id",
    "name",
    "complete_name",
    "parent_id",
    "manager_id",
    "member_ids",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub complete_name: Option<String>,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<RefPair>,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<RefPair>,
    /// Employee ids in this department
    #[serde(default)]
    pub member_ids: Vec<i64>,
}
