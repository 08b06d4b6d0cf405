//! Error types surfaced to the session host
//!
//! Per-frame absence of data is never an error; only acquisition failures
//! and host misuse reach these types.

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::session::Phase;

/// Pose source could not be opened
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("pose source unavailable: {0}")]
    Unavailable(String),
}

/// Errors that abort or refuse a session operation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),
    #[error("{field} needs {missing} more characters")]
    InvalidCredentials { field: &'static str, missing: usize },
    #[error("operation requires phase {expected:?}, session is in {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },
    #[error("no session initialized")]
    NoSession,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::InvalidConfig(err.to_string())
    }
}

impl From<SessionError> for JsValue {
    fn from(err: SessionError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
