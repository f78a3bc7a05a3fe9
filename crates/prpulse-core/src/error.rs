//! Shared error type across prpulse crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed payload.
    BadRequest,
    /// Webhook signature verification failed.
    AuthFailed,
    /// Unknown PR or resource.
    NotFound,
    /// Upstream (GitHub / stats endpoint) call failed.
    Upstream,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::AuthFailed => "AUTH_FAILED",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Upstream => "UPSTREAM",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PrPulseError>;

/// Unified error type used by core, service, and watch.
#[derive(Debug, Error)]
pub enum PrPulseError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("auth failed")]
    AuthFailed,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("upstream: {0}")]
    Upstream(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl PrPulseError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            PrPulseError::BadRequest(_) => ClientCode::BadRequest,
            PrPulseError::AuthFailed => ClientCode::AuthFailed,
            PrPulseError::NotFound(_) => ClientCode::NotFound,
            PrPulseError::Upstream(_) => ClientCode::Upstream,
            PrPulseError::Internal(_) => ClientCode::Internal,
        }
    }
}
