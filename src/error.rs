//! Error types for binding and dispatch.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::binding::Signature;

/// Construction-time binding failures.
///
/// These are fatal configuration errors: the host must abort startup on
/// `Err` rather than serve with a partial handler set. There is no
/// runtime fallback for a method that failed to bind.
#[derive(Debug, Error)]
pub enum BindError {
    /// The service's method table has no entry under the requested name.
    #[error("service {service:?} has no method named {method:?}")]
    MethodNotFound {
        /// The service's path prefix.
        service: &'static str,
        /// The name that failed to resolve.
        method: String,
    },
    /// The declared signature falls outside the supported conventions.
    #[error("method {method:?} declares unsupported signature {signature}")]
    InvalidSignature { method: String, signature: Signature },
}

/// Wire form of a JSON decode failure, serialized as the 422 body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct DecodeError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl From<&serde_json::Error> for DecodeError {
    fn from(err: &serde_json::Error) -> Self {
        DecodeError {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

/// Domain error reported by a bound method, serialized as the 500 body.
///
/// Methods build these directly or convert any error chain through the
/// `anyhow` seam with `?`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct EndpointError {
    pub message: String,
    /// Optional structured payload carried alongside the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl EndpointError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }
}

impl From<anyhow::Error> for EndpointError {
    fn from(err: anyhow::Error) -> Self {
        Self {
            message: format!("{err:#}"),
            detail: None,
        }
    }
}

/// Runtime failure classes inside a single dispatch.
///
/// Each maps to exactly one status: decode failures are 422, endpoint
/// errors and encode failures are 500. All are local to one request.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("request decode failed: {0}")]
    Decode(DecodeError),
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    #[error("response encode failed: {0}")]
    Encode(serde_json::Error),
}
