//! # Client Error Types
//!
//! Every way a backend interaction can fail, grouped the way the operator
//! has to react to it.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Before request │  │  Backend said   │  │   No answer             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Core (guards)  │  │  Rejected  400  │  │  Connection             │ │
//! │  │  InvalidConfig  │  │  NotFound  404  │  │  Timeout                │ │
//! │  │  NotLoggedIn    │  │  Duplicate 409  │  │                         │ │
//! │  │                 │  │  Unauthorized   │  │  (operator may retry)   │ │
//! │  │                 │  │  Server (other) │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this crate retries on its own. `is_retryable` only tells the
//! operator a manual retry makes sense.

use puntos_core::{CoreError, ValidationError};
use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Local (nothing was sent)
    // =========================================================================
    /// A register guard failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid API base URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to read config or token file.
    #[error("Failed to load {what}: {reason}")]
    LoadFailed { what: String, reason: String },

    /// Failed to write config or token file.
    #[error("Failed to save {what}: {reason}")]
    SaveFailed { what: String, reason: String },

    /// An authenticated call was attempted with no (valid) token.
    #[error("Session expired or missing. Log in again.")]
    NotLoggedIn,

    // =========================================================================
    // Backend Responses
    // =========================================================================
    /// 400: the backend rejected the request body.
    #[error("{0}")]
    Rejected(String),

    /// 401: credentials rejected; the stored token has been cleared.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 404: customer (or other resource) does not exist.
    #[error("Customer not found")]
    NotFound(Option<String>),

    /// 409: this reference was already processed for the customer.
    #[error("Duplicate reference: this ticket was already processed")]
    Duplicate(Option<String>),

    /// Any other status.
    #[error("Backend error ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Server {
        status: u16,
        detail: Option<String>,
    },

    /// The response body did not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    // =========================================================================
    // Transport
    // =========================================================================
    /// No response: DNS, refused connection, offline.
    #[error("Could not reach the backend: {0}")]
    Connection(String),

    /// The request timed out.
    #[error("The backend did not answer in time")]
    Timeout,
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Core(CoreError::Validation(err))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::Server {
                status: status.as_u16(),
                detail: None,
            }
        } else {
            ClientError::Connection(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::LoadFailed {
            what: "config".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::SaveFailed {
            what: "config".to_string(),
            reason: err.to_string(),
        }
    }
}

impl ClientError {
    /// Maps a non-success status and its `detail` text to an error.
    pub fn from_status(status: StatusCode, detail: Option<String>) -> Self {
        match status {
            StatusCode::BAD_REQUEST => {
                ClientError::Rejected(detail.unwrap_or_else(|| "Invalid request".to_string()))
            }
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(
                detail.unwrap_or_else(|| "invalid or expired credentials".to_string()),
            ),
            StatusCode::NOT_FOUND => ClientError::NotFound(detail),
            StatusCode::CONFLICT => ClientError::Duplicate(detail),
            other => ClientError::Server {
                status: other.as_u16(),
                detail,
            },
        }
    }

    // =========================================================================
    // Error Categorization
    // =========================================================================

    /// True when no answer came back and the operator may try again.
    ///
    /// A duplicate (409) is never retryable: the first request committed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Connection(_) | ClientError::Timeout)
    }

    /// True when the operator must log in again.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_) | ClientError::NotLoggedIn)
    }

    /// True when the problem is in what was typed or scanned.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, ClientError::Core(_) | ClientError::Rejected(_))
    }

    /// True for configuration and local file problems.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::LoadFailed { .. }
                | ClientError::SaveFailed { .. }
        )
    }
}
