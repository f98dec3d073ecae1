//! Remote ERP access.

mod client;
mod domain;
mod session;

pub use client::OdooClient;
pub use domain::Domain;
pub use session::{SessionCache, SessionKey};

use thiserror::Error;

use crate::xmlrpc::XmlRpcError;

/// Failure of a remote call.
#[derive(Debug, Error)]
pub enum OdooError {
    /// The remote rejected the credentials or returned no uid
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Network failure or timeout
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The RPC endpoint answered with a non-success status
    #[error("HTTP {status} from {endpoint}")]
    Http { status: u16, endpoint: String },

    /// The remote method itself failed
    #[error("remote error {code}: {message}")]
    Remote { code: i64, message: String },

    /// The response could not be understood
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl OdooError {
    /// Whether a cached session should be dropped after this error.
    pub fn is_session_problem(&self) -> bool {
        match self {
            OdooError::AuthenticationFailed(_) => true,
            OdooError::Remote { message, .. } => {
                let message = message.to_ascii_lowercase();
                message.contains("accessdenied")
                    || message.contains("access denied")
                    || message.contains("session expired")
            }
            _ => false,
        }
    }
}

impl From<XmlRpcError> for OdooError {
    fn from(err: XmlRpcError) -> Self {
        match err {
            XmlRpcError::Fault { code, message } => OdooError::Remote { code, message },
            other => OdooError::Protocol(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_becomes_remote_error() {
        let err = OdooError::from(XmlRpcError::Fault {
            code: 2,
            message: "ValueError".into(),
        });
        assert!(matches!(err, OdooError::Remote { code: 2, .. }));
    }

    #[test]
    fn test_session_problem_detection() {
        let denied = OdooError::Remote {
            code: 3,
            message: "odoo.exceptions.AccessDenied: Access Denied".into(),
        };
        assert!(denied.is_session_problem());

        let bad_filter = OdooError::Remote {
            code: 1,
            message: "Invalid field 'foo' on model 'hr.employee'".into(),
        };
        assert!(!bad_filter.is_session_problem());
        assert!(!OdooError::Protocol("x".into()).is_session_problem());
    }
}
