#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use orderbridge_api::{router, AppContext};
use orderbridge_domain::{Config, ExactConfig, ServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const DIVISION: &str = "123456";

/// Router wired against a mock Exact Online platform.
pub struct TestApp {
    pub exact: MockServer,
    pub router: Router,
}

impl TestApp {
    pub async fn start() -> Self {
        Self::start_with_fallback(None).await
    }

    pub async fn start_with_fallback(fallback_customer_guid: Option<&str>) -> Self {
        let exact = MockServer::start().await;
        let config = Config {
            server: ServerConfig::default(),
            exact: ExactConfig {
                client_id: "client-id".into(),
                client_secret: "client-secret".into(),
                refresh_token: "refresh-1".into(),
                division: DIVISION.into(),
                base_url: exact.uri(),
                fallback_customer_guid: fallback_customer_guid.map(str::to_string),
                timeout_secs: 5,
            },
        };
        let context = AppContext::new(config).expect("context should build");
        Self { exact, router: router(Arc::new(context)) }
    }

    /// POST a raw body to the order endpoint and return status plus JSON body.
    pub async fn post_order(&self, body: impl Into<String>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/orders/exact")
            .header("content-type", "application/json")
            .body(Body::from(body.into()))
            .expect("request should build");
        self.call(request).await
    }

    pub async fn call(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.expect("oneshot failed");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body should read");
        let body = serde_json::from_slice(&bytes).expect("body is not valid JSON");
        (status, body)
    }

    /// Token endpoint answering with `access_token`, expected `times` times.
    pub async fn mount_token(&self, access_token: &str, times: u64) {
        Mock::given(method("POST"))
            .and(path("/api/oauth2/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "access_token": access_token })),
            )
            .expect(times)
            .mount(&self.exact)
            .await;
    }

    /// Account lookup resolving every code to `guid`.
    pub async fn mount_account(&self, guid: &str) {
        Mock::given(method("GET"))
            .and(path(accounts_path()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "d": { "results": [{ "ID": guid }] } })),
            )
            .mount(&self.exact)
            .await;
    }
}

pub fn accounts_path() -> String {
    format!("/api/v1/{DIVISION}/crm/Accounts")
}

pub fn sales_orders_path() -> String {
    format!("/api/v1/{DIVISION}/salesorder/SalesOrders")
}

pub fn sample_order() -> String {
    json!({
        "customer": { "debtorCode": "D100" },
        "order": {
            "orderNumber": "PO-7",
            "date": "2025-03-01",
            "lines": [
                { "itemCode": "ITM1", "description": "Widget", "quantity": 2, "price": 9.5 },
                { "itemCode": "ITM2" }
            ]
        }
    })
    .to_string()
}
