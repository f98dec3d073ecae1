//! Connection check endpoint.

use axum::extract::State;

use super::resource::decode;
use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{ConnectionInfo, ErpUser, USER_FIELDS};
use crate::AppState;

const TEST_FAILED: &str = "XML-RPC 테스트 실패";

/// GET /api/odoo/test - Authenticate and read back the proxy's own ERP user.
pub async fn test_connection(State(state): State<AppState>) -> ApiResult<ConnectionInfo> {
    let uid = state
        .odoo
        .authenticate()
        .await
        .map_err(|e| AppError::remote(TEST_FAILED, e))?;

    let user = state
        .odoo
        .read("res.users", uid, USER_FIELDS)
        .await
        .and_then(decode::<Vec<ErpUser>>)
        .map_err(|e| AppError::remote(TEST_FAILED, e))?
        .into_iter()
        .next();

    tracing::info!(uid, "ERP connection check succeeded");
    success(ConnectionInfo { uid, user })
}
