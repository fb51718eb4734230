//! Exact Online OAuth token store
//!
//! Holds the process-wide credential pair and exchanges the refresh token
//! for a new access token when none is held or the platform rejected the
//! current one. There is no expiry tracking: staleness is only discovered
//! through a 401 from a downstream call.
//!
//! All exchanges run under one async mutex, so concurrent requests never
//! trigger redundant refreshes.

use async_trait::async_trait;
use orderbridge_core::{AccessToken, AccessTokenProvider};
use orderbridge_domain::{BridgeError, ExactConfig, Result};
use reqwest::header::ACCEPT;
use reqwest::Method;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::types::{OAuthErrorBody, TokenResponse};
use crate::http::HttpClient;

struct Credentials {
    access_token: Option<String>,
    refresh_token: String,
}

/// Token store for the Exact Online API
pub struct ExactTokenManager {
    http_client: HttpClient,
    token_url: String,
    client_id: String,
    client_secret: String,
    credentials: Mutex<Credentials>,
}

impl ExactTokenManager {
    /// Create a token store seeded with the configured refresh token.
    pub fn new(config: &ExactConfig, http_client: HttpClient) -> Self {
        Self {
            http_client,
            token_url: config.token_url(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            credentials: Mutex::new(Credentials {
                access_token: None,
                refresh_token: config.refresh_token.clone(),
            }),
        }
    }

    /// Return the held access token, refreshing first if there is none.
    ///
    /// # Errors
    /// See [`Self::refresh`].
    pub async fn ensure_token(&self) -> Result<AccessToken> {
        let mut credentials = self.credentials.lock().await;
        if let Some(token) = &credentials.access_token {
            return Ok(token.clone());
        }
        self.exchange(&mut credentials).await
    }

    /// Unconditionally exchange the refresh token for a new access token.
    ///
    /// # Errors
    /// - `BridgeError::Config` if no refresh token is held
    /// - `BridgeError::Auth` if the platform rejects the exchange or returns
    ///   no access token
    /// - `BridgeError::Network` on transport failure
    pub async fn refresh(&self) -> Result<AccessToken> {
        let mut credentials = self.credentials.lock().await;
        self.exchange(&mut credentials).await
    }

    /// Whether an access token is currently held.
    pub async fn has_access_token(&self) -> bool {
        self.credentials.lock().await.access_token.is_some()
    }

    #[instrument(skip(self, credentials), fields(token_url = %self.token_url))]
    async fn exchange(&self, credentials: &mut Credentials) -> Result<AccessToken> {
        if credentials.refresh_token.trim().is_empty() {
            return Err(BridgeError::Config("EXACT_REFRESH_TOKEN is missing".into()));
        }

        let params = [
            ("refresh_token", credentials.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let request = self
            .http_client
            .request(Method::POST, &self.token_url)
            .header(ACCEPT, "application/json")
            .form(&params);

        let response = self.http_client.send(request).await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let reason = serde_json::from_str::<OAuthErrorBody>(&body)
                .ok()
                .and_then(|e| e.reason().map(str::to_string))
                .unwrap_or_else(|| body.trim().to_string());
            warn!(status = status.as_u16(), reason = %reason, "Exact token exchange rejected");
            return Err(BridgeError::Auth(format!(
                "token exchange rejected (HTTP {}): {}",
                status.as_u16(),
                reason
            )));
        }

        let tokens: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            BridgeError::Auth(format!("token response could not be parsed: {e}"))
        })?;

        let access_token = tokens
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| BridgeError::Auth("token response carried no access_token".into()))?;

        let rotated = match tokens.refresh_token.filter(|t| !t.is_empty()) {
            Some(next) => {
                credentials.refresh_token = next;
                true
            }
            None => false,
        };
        credentials.access_token = Some(access_token.clone());

        info!(
            rotated,
            token_type = tokens.token_type.as_deref().unwrap_or("bearer"),
            "Exact access token refreshed"
        );
        Ok(access_token)
    }
}

#[async_trait]
impl AccessTokenProvider for ExactTokenManager {
    async fn access_token(&self) -> Result<AccessToken> {
        self.ensure_token().await
    }

    async fn refresh_after_rejection(&self, rejected: &str) -> Result<()> {
        let mut credentials = self.credentials.lock().await;

        let already_replaced = matches!(
            credentials.access_token.as_deref(),
            Some(current) if current != rejected
        );
        if already_replaced {
            debug!("access token already replaced by a concurrent refresh");
            return Ok(());
        }

        credentials.access_token = None;
        self.exchange(&mut credentials).await.map(|_| ())
    }
}
