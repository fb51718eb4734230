//! Exact Online integration
//!
//! - **Auth**: `ExactTokenManager` - refresh-token exchange and the shared
//!   access token
//! - **Client**: `ExactClient` - account lookup and sales-order creation
//!
//! Both adapters share one [`HttpClient`] built from [`ExactConfig`].

pub mod auth;
pub mod client;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use orderbridge_domain::{ExactConfig, Result};

pub use auth::ExactTokenManager;
pub use client::ExactClient;

use crate::http::HttpClient;

const USER_AGENT: &str = concat!("orderbridge/", env!("CARGO_PKG_VERSION"));

/// The Exact adapters wired against one configuration
#[derive(Clone)]
pub struct ExactIntegration {
    pub tokens: Arc<ExactTokenManager>,
    pub client: Arc<ExactClient>,
}

impl ExactIntegration {
    /// Build the token store and REST client for `config`.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn from_config(config: &ExactConfig) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            tokens: Arc::new(ExactTokenManager::new(config, http_client.clone())),
            client: Arc::new(ExactClient::new(config, http_client)),
        })
    }
}
