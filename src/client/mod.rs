//! Client-side facade over the proxy endpoints.
//!
//! One method per resource operation. These methods never fail: errors are
//! logged and replaced by an empty list, `None` or `false`. Use
//! [`HrClient::send`] where a failure has to be told apart from "no data".

mod error;

pub use error::{ClientError, ClientResult};

use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value as JsonValue;

use crate::auth::API_KEY_HEADER;
use crate::config::ClientConfig;
use crate::models::{
    Attendance, ConnectionInfo, Contract, DashboardStats, Department, Employee, Job, Payslip,
};

/// Response envelope produced by the proxy.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    #[serde(default)]
    degraded: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// Explicitly constructed client for the HR proxy.
#[derive(Debug, Clone)]
pub struct HrClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HrClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one request and unwrap the `{success, data}` envelope.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&JsonValue>,
    ) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut request = self.client.request(method, &url);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let envelope: Envelope<T> = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(ClientError::Api {
                    status: status.as_u16(),
                    message: text,
                    details: None,
                })
            }
            Err(e) => return Err(e.into()),
        };

        if !status.is_success() || !envelope.success {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: envelope.error.unwrap_or_else(|| status.to_string()),
                details: envelope.details,
            });
        }
        if envelope.degraded {
            return Err(ClientError::Degraded(
                envelope.error.unwrap_or_else(|| path.to_string()),
            ));
        }

        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse(format!("{} returned no data", path)))
    }

    async fn fetch<T: DeserializeOwned + Default>(&self, path: &str, context: &str) -> T {
        self.or_default(self.send(Method::GET, path, None).await, context)
    }

    fn or_default<T: Default>(&self, result: ClientResult<T>, context: &str) -> T {
        result.unwrap_or_else(|e| {
            tracing::error!("{}: {}", context, e);
            T::default()
        })
    }

    async fn create(&self, path: &str, payload: &JsonValue, context: &str) -> Option<i64> {
        let result = self.send::<JsonValue>(Method::POST, path, Some(payload)).await;
        self.or_default(result.map(|id| id.as_i64()), context)
    }

    async fn update(&self, path: &str, payload: &JsonValue, context: &str) -> bool {
        let result = self.send::<JsonValue>(Method::PUT, path, Some(payload)).await;
        self.or_default(result.map(|ok| ok.as_bool().unwrap_or(false)), context)
    }

    async fn delete(&self, path: &str, context: &str) -> bool {
        let result = self.send::<JsonValue>(Method::DELETE, path, None).await;
        self.or_default(result.map(|ok| ok.as_bool().unwrap_or(false)), context)
    }

    // ========== Employees ==========

    pub async fn employees(&self) -> Vec<Employee> {
        self.fetch("employees", "Listing employees failed").await
    }

    pub async fn employee(&self, id: i64) -> Option<Employee> {
        self.fetch(&format!("employees/{}", id), "Fetching employee failed")
            .await
    }

    pub async fn create_employee(&self, payload: &JsonValue) -> Option<i64> {
        self.create("employees", payload, "Creating employee failed")
            .await
    }

    pub async fn update_employee(&self, id: i64, payload: &JsonValue) -> bool {
        self.update(&format!("employees/{}", id), payload, "Updating employee failed")
            .await
    }

    pub async fn delete_employee(&self, id: i64) -> bool {
        self.delete(&format!("employees/{}", id), "Deleting employee failed")
            .await
    }

    // ========== Departments ==========

    pub async fn departments(&self) -> Vec<Department> {
        self.fetch("departments", "Listing departments failed").await
    }

    pub async fn department(&self, id: i64) -> Option<Department> {
        self.fetch(&format!("departments/{}", id), "Fetching department failed")
            .await
    }

    pub async fn create_department(&self, payload: &JsonValue) -> Option<i64> {
        self.create("departments", payload, "Creating department failed")
            .await
    }

    pub async fn update_department(&self, id: i64, payload: &JsonValue) -> bool {
        self.update(
            &format!("departments/{}", id),
            payload,
            "Updating department failed",
        )
        .await
    }

    pub async fn delete_department(&self, id: i64) -> bool {
        self.delete(&format!("departments/{}", id), "Deleting department failed")
            .await
    }

    // ========== Payroll ==========

    pub async fn contracts(&self, employee_id: Option<i64>, limit: u32) -> Vec<Contract> {
        self.fetch(
            &list_path("contracts", employee_id, limit),
            "Listing contracts failed",
        )
        .await
    }

    pub async fn payslips(&self, employee_id: Option<i64>, limit: u32) -> Vec<Payslip> {
        self.fetch(
            &list_path("payroll", employee_id, limit),
            "Listing payslips failed",
        )
        .await
    }

    pub async fn contract(&self, id: i64) -> Option<Contract> {
        self.fetch(&format!("payroll/{}", id), "Fetching contract failed")
            .await
    }

    pub async fn create_contract(&self, payload: &JsonValue) -> Option<i64> {
        self.create("payroll", payload, "Creating contract failed")
            .await
    }

    pub async fn update_contract(&self, id: i64, payload: &JsonValue) -> bool {
        self.update(&format!("payroll/{}", id), payload, "Updating contract failed")
            .await
    }

    pub async fn delete_contract(&self, id: i64) -> bool {
        self.delete(&format!("payroll/{}", id), "Deleting contract failed")
            .await
    }

    // ========== Attendance, jobs, dashboard ==========

    pub async fn attendances(&self, employee_id: Option<i64>, limit: u32) -> Vec<Attendance> {
        self.fetch(
            &list_path("attendance", employee_id, limit),
            "Listing attendance failed",
        )
        .await
    }

    pub async fn jobs(&self) -> Vec<Job> {
        self.fetch("jobs", "Listing jobs failed").await
    }

    pub async fn stats(&self) -> Option<DashboardStats> {
        self.fetch("stats", "Fetching dashboard statistics failed")
            .await
    }

    pub async fn test_connection(&self) -> Option<ConnectionInfo> {
        self.fetch("test", "ERP connection check failed").await
    }
}

fn list_path(resource: &str, employee_id: Option<i64>, limit: u32) -> String {
    match employee_id {
        Some(id) => format!("{}?employeeId={}&limit={}", resource, id, limit),
        None => format!("{}?limit={}", resource, limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_path() {
        assert_eq!(list_path("payroll", None, 20), "payroll?limit=20");
        assert_eq!(
            list_path("attendance", Some(42), 10),
            "attendance?employeeId=42&limit=10"
        );
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = HrClient::new(&ClientConfig::new("http://localhost:8080/api/odoo/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api/odoo");
    }
}
