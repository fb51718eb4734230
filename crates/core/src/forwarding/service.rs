//! Order forwarding service - core business logic
//!
//! One request makes a single pass through the stages in [`ForwardStage`].
//! A 401 from the platform triggers one credential refresh and is reported as
//! [`ForwardOutcome::RetryRequested`]; the order itself is never resubmitted.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use orderbridge_domain::{AccountId, BridgeError, OrderRequest, Result};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::mapper::{build_payload, validate_order};
use super::ports::{AccessTokenProvider, AccountDirectory, SalesOrderGateway};

/// Last stage a request reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardStage {
    Received,
    TokenReady,
    AccountResolved,
    Mapped,
    Submitted,
}

impl ForwardStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::TokenReady => "token_ready",
            Self::AccountResolved => "account_resolved",
            Self::Mapped => "mapped",
            Self::Submitted => "submitted",
        }
    }
}

/// Terminal result of a request that did not fail outright.
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardOutcome {
    /// The platform accepted the order; carries its response body.
    Submitted(Value),
    /// The access token was rejected and one refresh was attempted.
    ///
    /// `refresh_error` is set when that refresh failed too. Either way the
    /// caller has to send the order again.
    RetryRequested { refresh_error: Option<BridgeError> },
}

/// Drives an order through token, account lookup, mapping and submission.
pub struct OrderForwardingService {
    tokens: Arc<dyn AccessTokenProvider>,
    accounts: Arc<dyn AccountDirectory>,
    orders: Arc<dyn SalesOrderGateway>,
    fallback_account: Option<AccountId>,
    today: fn() -> NaiveDate,
}

impl OrderForwardingService {
    /// Create a new forwarding service
    pub fn new(
        tokens: Arc<dyn AccessTokenProvider>,
        accounts: Arc<dyn AccountDirectory>,
        orders: Arc<dyn SalesOrderGateway>,
    ) -> Self {
        Self { tokens, accounts, orders, fallback_account: None, today: utc_today }
    }

    /// Account used for orders that arrive without a debtor code.
    #[must_use]
    pub fn with_fallback_account(mut self, account: Option<AccountId>) -> Self {
        self.fallback_account = account.filter(|a| !a.trim().is_empty());
        self
    }

    /// Override the date source used for orders without a date.
    #[must_use]
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Forward one order to the platform.
    ///
    /// # Errors
    /// Any failure other than a rejected access token: validation, config,
    /// auth (token exchange), not found (account lookup), upstream or
    /// network errors.
    pub async fn forward(&self, order: &OrderRequest) -> Result<ForwardOutcome> {
        let mut stage = ForwardStage::Received;
        debug!(
            stage = stage.as_str(),
            debtor_code = order.debtor_code().unwrap_or_default(),
            lines = order.line_count(),
            "order received"
        );

        self.validate(order).map_err(|e| failed(stage, e))?;

        let token = self.tokens.access_token().await.map_err(|e| failed(stage, e))?;
        stage = ForwardStage::TokenReady;

        let account = match self.resolve_account(&token, order).await {
            Ok(account) => account,
            Err(err) if err.is_unauthorized() => return Ok(self.signal_retry(stage, &token).await),
            Err(err) => return Err(failed(stage, err)),
        };
        stage = ForwardStage::AccountResolved;
        debug!(stage = stage.as_str(), account = %account, "account resolved");

        let payload = build_payload(order, &account, (self.today)()).map_err(|e| failed(stage, e))?;
        stage = ForwardStage::Mapped;

        let submission = self.orders.create_sales_order(&token, &payload).await;
        stage = ForwardStage::Submitted;

        match submission {
            Ok(response) => {
                info!(
                    stage = stage.as_str(),
                    account = %account,
                    lines = payload.sales_order_lines.len(),
                    "sales order created"
                );
                Ok(ForwardOutcome::Submitted(response))
            }
            Err(err) if err.is_unauthorized() => Ok(self.signal_retry(stage, &token).await),
            Err(err) => Err(failed(stage, err)),
        }
    }

    fn validate(&self, order: &OrderRequest) -> Result<()> {
        if order.debtor_code().is_none() && self.fallback_account.is_none() {
            return Err(BridgeError::Validation("customer.debtorCode is missing".into()));
        }
        validate_order(order)
    }

    async fn resolve_account(&self, token: &str, order: &OrderRequest) -> Result<AccountId> {
        match (order.debtor_code(), &self.fallback_account) {
            (Some(code), _) => self.accounts.resolve_account(token, code).await,
            (None, Some(fallback)) => {
                debug!(account = %fallback, "no debtor code supplied, using fallback account");
                Ok(fallback.clone())
            }
            (None, None) => Err(BridgeError::Validation("customer.debtorCode is missing".into())),
        }
    }

    async fn signal_retry(&self, stage: ForwardStage, rejected: &str) -> ForwardOutcome {
        warn!(stage = stage.as_str(), "access token rejected, refreshing once");

        let refresh_error = match self.tokens.refresh_after_rejection(rejected).await {
            Ok(()) => None,
            Err(err) => {
                warn!(stage = stage.as_str(), error = %err, "token refresh after 401 failed");
                Some(err)
            }
        };

        ForwardOutcome::RetryRequested { refresh_error }
    }
}

fn failed(stage: ForwardStage, err: BridgeError) -> BridgeError {
    warn!(stage = stage.as_str(), kind = err.label(), error = %err, "order forwarding failed");
    err
}

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}
