#![allow(dead_code)]

use std::time::Duration;

use orderbridge_domain::{ExactConfig, SalesOrderLine, SalesOrderPayload};
use orderbridge_infra::http::HttpClient;
use wiremock::MockServer;

pub const DIVISION: &str = "123456";

/// Exact settings pointing at the given mock server.
pub fn exact_config(server: &MockServer) -> ExactConfig {
    ExactConfig {
        client_id: "client-id".into(),
        client_secret: "client-secret".into(),
        refresh_token: "refresh-1".into(),
        division: DIVISION.into(),
        base_url: server.uri(),
        fallback_customer_guid: None,
        timeout_secs: 5,
    }
}

/// HTTP client with a short timeout for tests.
pub fn http_client() -> HttpClient {
    HttpClient::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("http client should build")
}

pub fn accounts_path() -> String {
    format!("/api/v1/{DIVISION}/crm/Accounts")
}

pub fn sales_orders_path() -> String {
    format!("/api/v1/{DIVISION}/salesorder/SalesOrders")
}

pub fn sample_payload() -> SalesOrderPayload {
    SalesOrderPayload {
        order_date: "2025-03-01".into(),
        description: "Order PO-7".into(),
        ordered_by: "guid-1".into(),
        sales_order_lines: vec![SalesOrderLine {
            item: "ITM1".into(),
            description: "Widget".into(),
            quantity: 2.0,
            unit_price: 9.5,
        }],
    }
}
