//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Main error type for OrderBridge
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum BridgeError {
    /// A required configuration value is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The inbound order document is malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The OAuth token exchange was rejected.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// No account matched the requested debtor code.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The accounting platform answered with a non-success status.
    #[error("Upstream error: HTTP {status}")]
    Upstream { status: u16, body: Value },

    /// Transport-level failure talking to the accounting platform.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BridgeError {
    /// Build an upstream error from a raw response body.
    ///
    /// JSON bodies are kept structured so they can be echoed to the caller;
    /// anything else is carried as a plain string.
    pub fn upstream(status: u16, raw_body: &str) -> Self {
        let body = serde_json::from_str(raw_body)
            .unwrap_or_else(|_| Value::String(raw_body.to_string()));
        Self::Upstream { status, body }
    }

    /// True when the platform rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Upstream { status: 401, .. })
    }

    /// Stable label suitable for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Validation(_) => "validation",
            Self::Auth(_) => "auth",
            Self::NotFound(_) => "not_found",
            Self::Upstream { .. } => "upstream",
            Self::Network(_) => "network",
            Self::Internal(_) => "internal",
        }
    }

    /// Detail to report back to the caller.
    ///
    /// Upstream failures echo the platform body; every other variant reports
    /// its message.
    pub fn detail(&self) -> Value {
        match self {
            Self::Upstream { body, .. } => body.clone(),
            other => Value::String(other.to_string()),
        }
    }
}

/// Result type alias for OrderBridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;
