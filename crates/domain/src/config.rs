//! Configuration management

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{
    DEFAULT_EXACT_BASE_URL, DEFAULT_HOST, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PORT,
    EXACT_TOKEN_PATH,
};
use crate::{BridgeError, Result};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub exact: ExactConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Exact Online connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExactConfig {
    pub client_id: String,
    #[serde(skip_serializing)]
    pub client_secret: String,
    /// Seeds the token store at startup; rotated in memory afterwards.
    #[serde(skip_serializing)]
    pub refresh_token: String,
    /// Company unit every API call is scoped to.
    pub division: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Account used when an order arrives without a debtor code.
    #[serde(default)]
    pub fallback_customer_guid: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Config {
    /// Reject configurations that would fail on the first request.
    ///
    /// # Errors
    /// Returns `BridgeError::Config` naming the first offending setting.
    pub fn validate(&self) -> Result<()> {
        self.exact.validate()
    }
}

impl ExactConfig {
    /// See [`Config::validate`].
    ///
    /// # Errors
    /// Returns `BridgeError::Config` naming the first offending setting.
    pub fn validate(&self) -> Result<()> {
        require("EXACT_REFRESH_TOKEN", &self.refresh_token)?;
        require("EXACT_DIVISION", &self.division)?;
        require("EXACT_CLIENT_ID", &self.client_id)?;
        require("EXACT_CLIENT_SECRET", &self.client_secret)?;

        Url::parse(&self.base_url).map_err(|e| {
            BridgeError::Config(format!("Invalid Exact base URL '{}': {e}", self.base_url))
        })?;

        if self.timeout_secs == 0 {
            return Err(BridgeError::Config("HTTP timeout must be at least one second".into()));
        }

        Ok(())
    }

    /// OAuth token endpoint.
    pub fn token_url(&self) -> String {
        format!("{}{EXACT_TOKEN_PATH}", self.trimmed_base())
    }

    /// URL of a division-scoped REST resource, e.g. `crm/Accounts`.
    pub fn resource_url(&self, resource: &str) -> String {
        format!("{}/api/v1/{}/{resource}", self.trimmed_base(), self.division)
    }

    fn trimmed_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

fn require(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BridgeError::Config(format!("{name} is missing or empty")));
    }
    Ok(())
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_base_url() -> String {
    DEFAULT_EXACT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}
