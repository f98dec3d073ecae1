//! Authenticate-then-execute client for Odoo's XML-RPC services.

use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;

use super::{Domain, OdooError, SessionCache, SessionKey};
use crate::config::OdooConfig;
use crate::xmlrpc::{decode_response, encode_call, Value};

const CREDENTIALS_REJECTED: &str = "credentials rejected";

/// Client for the `common` and `object` XML-RPC services.
///
/// Constructed once and shared; every operation obtains a uid (from the
/// session cache when enabled) and then invokes `execute_kw`.
#[derive(Debug, Clone)]
pub struct OdooClient {
    http: reqwest::Client,
    config: OdooConfig,
    sessions: Arc<SessionCache>,
}

impl OdooClient {
    /// Create a client with its own transport and session cache.
    pub fn new(config: OdooConfig) -> Result<Self, OdooError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        let sessions = Arc::new(SessionCache::new(config.session_ttl));
        Ok(Self {
            http,
            config,
            sessions,
        })
    }

    fn session_key(&self) -> SessionKey {
        SessionKey {
            url: self.config.url.clone(),
            database: self.config.database.clone(),
            username: self.config.username.clone(),
        }
    }

    async fn call(&self, service: &str, method: &str, params: &[Value]) -> Result<Value, OdooError> {
        let endpoint = format!("{}/xmlrpc/2/{}", self.config.url, service);
        let response = self
            .http
            .post(&endpoint)
            .header(CONTENT_TYPE, "text/xml")
            .body(encode_call(method, params))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OdooError::Http {
                status: status.as_u16(),
                endpoint,
            });
        }

        let body = response.text().await?;
        Ok(decode_response(&body)?)
    }

    /// Run `common.authenticate` and return the uid.
    pub async fn authenticate(&self) -> Result<i64, OdooError> {
        let result = self
            .call(
                "common",
                "authenticate",
                &[
                    Value::from(self.config.database.as_str()),
                    Value::from(self.config.username.as_str()),
                    Value::from(self.config.password.as_str()),
                    Value::empty_struct(),
                ],
            )
            .await;

        match result {
            Ok(Value::Int(uid)) if uid > 0 => {
                tracing::debug!(uid, database = %self.config.database, "Authenticated against ERP");
                Ok(uid)
            }
            Ok(Value::Bool(false)) | Ok(Value::Int(_)) => {
                tracing::warn!(
                    username = %self.config.username,
                    database = %self.config.database,
                    "ERP rejected the configured credentials"
                );
                Err(OdooError::AuthenticationFailed(CREDENTIALS_REJECTED.to_string()))
            }
            Ok(other) => Err(OdooError::AuthenticationFailed(format!(
                "expected a uid, got {}",
                other.kind()
            ))),
            Err(OdooError::Remote { code, message }) => {
                tracing::warn!(
                    code,
                    database = %self.config.database,
                    "ERP authentication faulted: {}",
                    message
                );
                Err(OdooError::AuthenticationFailed(CREDENTIALS_REJECTED.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    async fn session(&self) -> Result<i64, OdooError> {
        let key = self.session_key();
        if let Some(uid) = self.sessions.get(&key).await {
            return Ok(uid);
        }

        let uid = self.authenticate().await?;
        self.sessions.insert(key, uid).await;
        Ok(uid)
    }

    /// Invoke `object.execute_kw(db, uid, password, model, method, args, kwargs)`.
    pub async fn execute_kw(
        &self,
        model: &str,
        method: &str,
        args: Vec<Value>,
        kwargs: Option<BTreeMap<String, Value>>,
    ) -> Result<Value, OdooError> {
        let uid = self.session().await?;

        let mut params = vec![
            Value::from(self.config.database.as_str()),
            Value::Int(uid),
            Value::from(self.config.password.as_str()),
            Value::from(model),
            Value::from(method),
            Value::Array(args),
        ];
        if let Some(kwargs) = kwargs {
            params.push(Value::Struct(kwargs));
        }

        tracing::debug!(model, method, "Calling execute_kw");
        let result = self.call("object", "execute_kw", &params).await;

        if let Err(e) = &result {
            if e.is_session_problem() {
                tracing::info!("Dropping cached ERP session after: {}", e);
                self.sessions.invalidate(&self.session_key()).await;
            }
            tracing::warn!(model, method, "execute_kw failed: {}", e);
        }
        result
    }

    /// `search_read` with a domain, a field selection and an optional limit.
    pub async fn search_read(
        &self,
        model: &str,
        domain: Domain,
        fields: &[&str],
        limit: Option<u32>,
    ) -> Result<Value, OdooError> {
        let mut kwargs = fields_kwargs(fields);
        if let Some(limit) = limit {
            kwargs.insert("limit".to_string(), Value::Int(i64::from(limit)));
        }
        self.execute_kw(model, "search_read", vec![domain.into()], Some(kwargs))
            .await
    }

    /// `read` of a single id; the remote answers with a list.
    pub async fn read(&self, model: &str, id: i64, fields: &[&str]) -> Result<Value, OdooError> {
        self.execute_kw(
            model,
            "read",
            vec![Value::Array(vec![Value::Int(id)])],
            Some(fields_kwargs(fields)),
        )
        .await
    }

    /// `create` of one record; the remote answers with the new id.
    pub async fn create(&self, model: &str, values: Value) -> Result<Value, OdooError> {
        self.execute_kw(model, "create", vec![values], None).await
    }

    pub async fn write(&self, model: &str, id: i64, values: Value) -> Result<Value, OdooError> {
        self.execute_kw(
            model,
            "write",
            vec![Value::Array(vec![Value::Int(id)]), values],
            None,
        )
        .await
    }

    pub async fn unlink(&self, model: &str, id: i64) -> Result<Value, OdooError> {
        self.execute_kw(model, "unlink", vec![Value::Array(vec![Value::Int(id)])], None)
            .await
    }

    pub async fn search_count(&self, model: &str, domain: Domain) -> Result<i64, OdooError> {
        let result = self
            .execute_kw(model, "search_count", vec![domain.into()], None)
            .await?;
        result.as_i64().ok_or_else(|| {
            OdooError::Protocol(format!("search_count returned {}", result.kind()))
        })
    }
}

fn fields_kwargs(fields: &[&str]) -> BTreeMap<String, Value> {
    let mut kwargs = BTreeMap::new();
    kwargs.insert(
        "fields".to_string(),
        Value::Array(fields.iter().map(|f| Value::from(*f)).collect()),
    );
    kwargs
}
