//! Employee record (`hr.employee`).

use serde::{Deserialize, Serialize};

use super::fields::{falsy, OdooDateTime, RefPair};

/// Fields requested for employee lists.
pub const EMPLOYEE_LIST_FIELDS: &[&str] = &[
    "id",
    "name",
    "work_email",
    "work_phone",
    "job_title",
    "department_id",
    "work_location_id",
];

/// Fields requested for a single employee.
pub const EMPLOYEE_DETAIL_FIELDS: &[&str] = &[
    "id",
    "name",
    "work_email",
    "work_phone",
    "job_title",
    "department_id",
    "work_location_id",
    "work_contact_id",
    "create_date",
    "write_date",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub work_email: Option<String>,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub work_phone: Option<String>,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub department_id: Option<RefPair>,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub work_location_id: Option<RefPair>,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub work_contact_id: Option<RefPair>,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub create_date: Option<OdooDateTime>,
    #[serde(default, deserialize_with = "falsy::deserialize", skip_serializing_if = "Option::is_none")]
    pub write_date: Option<OdooDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_remote_employee() {
        let employee: Employee = serde_json::from_value(json!({
            "id": 42,
            "name": "Kim Minji",
            "work_email": "minji@example.com",
            "work_phone": false,
            "job_title": false,
            "department_id": [7, "Engineering"],
            "work_location_id": false,
            "work_contact_id": [12, "Kim Minji"],
            "create_date": "2024-03-02 08:15:00",
            "write_date": "2024-04-10 11:00:00"
        }))
        .unwrap();

        assert_eq!(employee.department_id, Some(RefPair::new(7, "Engineering")));
        assert!(employee.work_phone.is_none());

        let out = serde_json::to_value(&employee).unwrap();
        assert_eq!(out["department_id"], json!({"id": 7, "label": "Engineering"}));
        assert_eq!(out["create_date"], "2024-03-02 08:15:00");
        assert!(out.get("job_title").is_none());
    }
}
