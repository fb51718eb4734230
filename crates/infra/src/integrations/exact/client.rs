//! Exact Online REST client for account lookup and sales-order creation

use async_trait::async_trait;
use orderbridge_core::{AccountDirectory, SalesOrderGateway};
use orderbridge_domain::constants::{EXACT_ACCOUNTS_PATH, EXACT_SALES_ORDERS_PATH};
use orderbridge_domain::{AccountId, BridgeError, ExactConfig, Result, SalesOrderPayload};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, Response};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::types::{AccountRecord, ODataEnvelope};
use crate::http::HttpClient;

/// Exact Online REST client scoped to one division
pub struct ExactClient {
    http_client: HttpClient,
    accounts_url: String,
    sales_orders_url: String,
}

impl ExactClient {
    /// Create a new client for the configured division
    pub fn new(config: &ExactConfig, http_client: HttpClient) -> Self {
        Self {
            http_client,
            accounts_url: config.resource_url(EXACT_ACCOUNTS_PATH),
            sales_orders_url: config.resource_url(EXACT_SALES_ORDERS_PATH),
        }
    }

    /// Resolve a debtor code to the account GUID.
    ///
    /// Issues `GET crm/Accounts?$filter=Code eq '<code>'&$select=ID`. The
    /// first result wins when several accounts share the code.
    ///
    /// # Errors
    /// - `BridgeError::NotFound` when no account has the code
    /// - `BridgeError::Upstream` for any non-success status (401 included)
    #[instrument(skip(self, access_token))]
    pub async fn find_account(&self, access_token: &str, debtor_code: &str) -> Result<AccountId> {
        let url = account_lookup_url(&self.accounts_url, debtor_code);
        debug!(url = %url, "looking up Exact account");

        let request = self
            .http_client
            .request(Method::GET, &url)
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .header(ACCEPT, "application/json");

        let response = self.http_client.send(request).await?;
        let body = read_success_body(response).await?;

        let envelope: ODataEnvelope<AccountRecord> = serde_json::from_value(body)
            .map_err(|e| BridgeError::Internal(format!("unexpected account lookup response: {e}")))?;
        let mut accounts = envelope.into_results();

        if accounts.len() > 1 {
            warn!(matches = accounts.len(), "several accounts share the debtor code, using the first");
        }

        if accounts.is_empty() {
            return Err(BridgeError::NotFound(format!("no account with code '{debtor_code}'")));
        }
        Ok(accounts.swap_remove(0).id)
    }

    /// Create a sales order and return the platform's response body.
    ///
    /// # Errors
    /// `BridgeError::Upstream` carrying the platform's error body on any
    /// non-success status.
    #[instrument(skip(self, access_token, payload), fields(lines = payload.sales_order_lines.len()))]
    pub async fn submit_sales_order(
        &self,
        access_token: &str,
        payload: &SalesOrderPayload,
    ) -> Result<Value> {
        let request = self
            .http_client
            .request(Method::POST, &self.sales_orders_url)
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .header(ACCEPT, "application/json")
            .json(payload);

        let response = self.http_client.send(request).await?;
        let body = read_success_body(response).await?;

        info!(ordered_by = %payload.ordered_by, "Exact accepted sales order");
        Ok(body)
    }
}

#[async_trait]
impl AccountDirectory for ExactClient {
    async fn resolve_account(&self, access_token: &str, debtor_code: &str) -> Result<AccountId> {
        self.find_account(access_token, debtor_code).await
    }
}

#[async_trait]
impl SalesOrderGateway for ExactClient {
    async fn create_sales_order(
        &self,
        access_token: &str,
        payload: &SalesOrderPayload,
    ) -> Result<Value> {
        self.submit_sales_order(access_token, payload).await
    }
}

/// Build the filtered account URL, escaping the code as an OData literal.
fn account_lookup_url(accounts_url: &str, debtor_code: &str) -> String {
    let filter = format!("Code eq '{}'", debtor_code.replace('\'', "''"));
    format!("{accounts_url}?$filter={}&$select=ID", urlencoding::encode(&filter))
}

/// Read the body of a response, mapping non-success statuses to
/// `BridgeError::Upstream`. Empty bodies read as `null`.
async fn read_success_body(response: Response) -> Result<Value> {
    let status = response.status();
    let raw = response
        .text()
        .await
        .map_err(|e| BridgeError::Network(format!("failed to read response body: {e}")))?;

    if !status.is_success() {
        warn!(status = status.as_u16(), "Exact request failed");
        return Err(BridgeError::upstream(status.as_u16(), &raw));
    }

    if raw.trim().is_empty() {
        return Ok(Value::Null);
    }

    // 2xx bodies that are not JSON are echoed as text.
    Ok(serde_json::from_str(&raw).unwrap_or(Value::String(raw)))
}
