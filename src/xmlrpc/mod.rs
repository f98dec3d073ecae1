//! Minimal XML-RPC support for talking to the ERP.
//!
//! Covers the value types Odoo emits and accepts, including the `nil`
//! extension it enables with `allow_none`.

mod codec;
mod value;

pub use codec::{decode_call, decode_response, encode_call, encode_fault, encode_response, MethodCall};
pub use value::Value;

use thiserror::Error;

/// Errors produced while decoding XML-RPC documents.
#[derive(Debug, Error)]
pub enum XmlRpcError {
    /// The document is not well-formed XML-RPC
    #[error("malformed XML-RPC document: {0}")]
    Malformed(String),

    /// A value type outside the supported set
    #[error("unsupported XML-RPC value type <{0}>")]
    Unsupported(String),

    /// The remote answered with a `<fault>`
    #[error("remote fault {code}: {message}")]
    Fault { code: i64, message: String },
}
