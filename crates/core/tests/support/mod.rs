//! Shared test helpers for `orderbridge-core` integration tests.
//!
//! Lightweight fakes for the platform ports that record every call so tests
//! can assert on what was (and was not) sent.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use orderbridge_core::{AccessTokenProvider, AccountDirectory, SalesOrderGateway};
use orderbridge_domain::{AccountId, BridgeError, Result, SalesOrderPayload};
use serde_json::Value;

/// Token provider handing out a fixed token and counting refreshes.
#[derive(Default)]
pub struct FakeTokens {
    pub token: Mutex<Option<String>>,
    pub acquire_error: Mutex<Option<BridgeError>>,
    pub refresh_error: Mutex<Option<BridgeError>>,
    pub refreshed_with: Mutex<Vec<String>>,
}

impl FakeTokens {
    pub fn with_token(token: &str) -> Arc<Self> {
        Arc::new(Self { token: Mutex::new(Some(token.to_string())), ..Self::default() })
    }

    pub fn failing(err: BridgeError) -> Arc<Self> {
        Arc::new(Self { acquire_error: Mutex::new(Some(err)), ..Self::default() })
    }

    pub fn refresh_calls(&self) -> Vec<String> {
        self.refreshed_with.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccessTokenProvider for FakeTokens {
    async fn access_token(&self) -> Result<String> {
        if let Some(err) = self.acquire_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.token.lock().unwrap().clone().unwrap_or_else(|| "token".to_string()))
    }

    async fn refresh_after_rejection(&self, rejected: &str) -> Result<()> {
        self.refreshed_with.lock().unwrap().push(rejected.to_string());
        match self.refresh_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Account directory answering from a queue of scripted results.
#[derive(Default)]
pub struct FakeAccounts {
    pub responses: Mutex<VecDeque<Result<AccountId>>>,
    pub lookups: Mutex<Vec<(String, String)>>,
}

impl FakeAccounts {
    pub fn resolving(account: &str) -> Arc<Self> {
        Self::scripted(vec![Ok(account.to_string())])
    }

    pub fn scripted(responses: Vec<Result<AccountId>>) -> Arc<Self> {
        Arc::new(Self { responses: Mutex::new(responses.into()), ..Self::default() })
    }

    pub fn lookups(&self) -> Vec<(String, String)> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccountDirectory for FakeAccounts {
    async fn resolve_account(&self, access_token: &str, debtor_code: &str) -> Result<AccountId> {
        self.lookups.lock().unwrap().push((access_token.to_string(), debtor_code.to_string()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BridgeError::NotFound(debtor_code.to_string())))
    }
}

/// Sales-order gateway recording submitted payloads.
#[derive(Default)]
pub struct FakeOrders {
    pub response: Mutex<Option<Result<Value>>>,
    pub submitted: Mutex<Vec<(String, SalesOrderPayload)>>,
}

impl FakeOrders {
    pub fn answering(response: Result<Value>) -> Arc<Self> {
        Arc::new(Self { response: Mutex::new(Some(response)), ..Self::default() })
    }

    pub fn submissions(&self) -> Vec<(String, SalesOrderPayload)> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl SalesOrderGateway for FakeOrders {
    async fn create_sales_order(
        &self,
        access_token: &str,
        payload: &SalesOrderPayload,
    ) -> Result<Value> {
        self.submitted.lock().unwrap().push((access_token.to_string(), payload.clone()));
        self.response.lock().unwrap().clone().unwrap_or(Ok(Value::Null))
    }
}

/// In-memory sink for formatted tracing output.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Route events at `WARN` and above on this thread into the buffer until
    /// the guard is dropped.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
