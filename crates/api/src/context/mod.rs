//! Application context - dependency injection container

use orderbridge_core::OrderForwardingService;
use orderbridge_domain::{Config, Result};
use orderbridge_infra::ExactIntegration;
use tracing::info;

/// Application context - holds the configuration and the forwarding service
pub struct AppContext {
    pub config: Config,
    pub forwarding: OrderForwardingService,
}

impl AppContext {
    /// Wire the Exact Online adapters for a validated configuration.
    ///
    /// # Errors
    /// Returns `BridgeError::Config` if the configuration is invalid, or an
    /// error if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let exact = ExactIntegration::from_config(&config.exact)?;
        let forwarding =
            OrderForwardingService::new(exact.tokens, exact.client.clone(), exact.client)
                .with_fallback_account(config.exact.fallback_customer_guid.clone());

        info!(
            division = %config.exact.division,
            base_url = %config.exact.base_url,
            fallback_account = config.exact.fallback_customer_guid.is_some(),
            "application context initialised"
        );

        Ok(Self { config, forwarding })
    }
}
