//! Shared error type across hubstat crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request or config.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Listener could not be bound.
    BindFailed,
    /// A collaborator (cluster or state registry) could not be read.
    Unavailable,
    /// Lifecycle call made in the wrong state.
    InvalidState,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::BindFailed => "BIND_FAILED",
            ClientCode::Unavailable => "UNAVAILABLE",
            ClientCode::InvalidState => "INVALID_STATE",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, HubStatError>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum HubStatError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("bind failed on {addr}: {reason}")]
    Bind { addr: String, reason: String },
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
    #[error("internal: {0}")]
    Internal(String),
}

impl HubStatError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            HubStatError::BadRequest(_) => ClientCode::BadRequest,
            HubStatError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            HubStatError::Bind { .. } => ClientCode::BindFailed,
            HubStatError::Unavailable(_) => ClientCode::Unavailable,
            HubStatError::InvalidState(_) => ClientCode::InvalidState,
            HubStatError::Internal(_) => ClientCode::Internal,
        }
    }
}
