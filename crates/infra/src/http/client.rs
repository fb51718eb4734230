//! Outbound HTTP client shared by the Exact Online adapters.
//!
//! Every request goes out exactly once. Any HTTP status comes back as a
//! response for the caller to interpret; only transport failures become
//! errors.

use std::time::{Duration, Instant};

use orderbridge_domain::constants::DEFAULT_HTTP_TIMEOUT_SECS;
use orderbridge_domain::{BridgeError, Result};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Start a request on the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send the request once.
    ///
    /// # Errors
    /// `BridgeError::Network` on timeout or connection failure,
    /// `BridgeError::Internal` if the request cannot be built.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build().map_err(into_bridge)?;
        let method = request.method().clone();
        let url = request.url().clone();
        let started = Instant::now();

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(
                    %method,
                    %url,
                    status = response.status().as_u16(),
                    elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                    "HTTP response"
                );
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(into_bridge(err))
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS), user_agent: None }
    }
}

impl HttpClientBuilder {
    /// Whole-request timeout, connect through body.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// # Errors
    /// `BridgeError::Internal` if reqwest rejects the configuration.
    pub fn build(self) -> Result<HttpClient> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(into_bridge)?;
        Ok(HttpClient { client })
    }
}

fn into_bridge(err: reqwest::Error) -> BridgeError {
    InfraError::from(err).into()
}
