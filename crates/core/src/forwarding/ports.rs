//! Port interfaces for the accounting platform

use async_trait::async_trait;
use orderbridge_domain::{AccountId, Result, SalesOrderPayload};
use serde_json::Value;

/// OAuth bearer token presented to the platform.
pub type AccessToken = String;

/// Trait for obtaining and renewing platform credentials
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Current access token, acquiring one first if none is held.
    async fn access_token(&self) -> Result<AccessToken>;

    /// Renew credentials after the platform answered 401 for `rejected`.
    ///
    /// Implementations skip the exchange when the held token already differs
    /// from `rejected`, so concurrent callers share one refresh.
    async fn refresh_after_rejection(&self, rejected: &str) -> Result<()>;
}

/// Trait for resolving customers to platform accounts
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Look up the account GUID for a debtor code.
    ///
    /// Returns `BridgeError::NotFound` when no account matches. With several
    /// matches the first one wins.
    async fn resolve_account(&self, access_token: &str, debtor_code: &str) -> Result<AccountId>;
}

/// Trait for submitting sales orders
#[async_trait]
pub trait SalesOrderGateway: Send + Sync {
    /// Create the sales order and return the platform's response body.
    async fn create_sales_order(
        &self,
        access_token: &str,
        payload: &SalesOrderPayload,
    ) -> Result<Value>;
}
