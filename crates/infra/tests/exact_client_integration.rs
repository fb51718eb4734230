//! Integration tests for the Exact Online adapters against a mock platform.

mod support;

use orderbridge_core::{AccessTokenProvider, AccountDirectory, SalesOrderGateway};
use orderbridge_domain::BridgeError;
use orderbridge_infra::integrations::{ExactClient, ExactIntegration};
use serde_json::json;
use support::{accounts_path, exact_config, http_client, sales_orders_path, sample_payload};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn resolves_account_with_filtered_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(accounts_path()))
        .and(query_param("$filter", "Code eq 'D100'"))
        .and(query_param("$select", "ID"))
        .and(header("authorization", "Bearer tok"))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"d": {"results": [{"ID": "guid-1"}]}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ExactClient::new(&exact_config(&server), http_client());
    let account = client.resolve_account("tok", "D100").await.expect("account should resolve");

    assert_eq!(account, "guid-1");
}

#[tokio::test]
async fn accepts_bare_array_envelope_and_takes_first_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(accounts_path()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"d": [{"ID": "first"}, {"ID": "second"}]})),
        )
        .mount(&server)
        .await;

    let client = ExactClient::new(&exact_config(&server), http_client());
    assert_eq!(client.resolve_account("tok", "D100").await.unwrap(), "first");
}

#[tokio::test]
async fn unknown_debtor_code_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(accounts_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"d": {"results": []}})))
        .mount(&server)
        .await;

    let client = ExactClient::new(&exact_config(&server), http_client());
    match client.resolve_account("tok", "NOPE").await {
        Err(BridgeError::NotFound(msg)) => assert!(msg.contains("NOPE")),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_token_on_lookup_is_unauthorized_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(accounts_path()))
        .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ExactClient::new(&exact_config(&server), http_client());
    let err = client.resolve_account("stale", "D100").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.detail(), json!("expired"));
}

#[tokio::test]
async fn submits_sales_order_and_returns_platform_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(sales_orders_path()))
        .and(header("authorization", "Bearer tok"))
        .and(body_json(json!({
            "OrderDate": "2025-03-01",
            "Description": "Order PO-7",
            "OrderedBy": "guid-1",
            "SalesOrderLines": [
                {"Item": "ITM1", "Description": "Widget", "Quantity": 2.0, "UnitPrice": 9.5}
            ]
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"d": {"OrderNumber": 42}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ExactClient::new(&exact_config(&server), http_client());
    let body = client.create_sales_order("tok", &sample_payload()).await.unwrap();

    assert_eq!(body, json!({"d": {"OrderNumber": 42}}));
}

#[tokio::test]
async fn rejected_sales_order_carries_platform_error_body() {
    let server = MockServer::start().await;
    let error_body = json!({"error": {"message": {"value": "Item ITM1 unknown"}}});
    Mock::given(method("POST"))
        .and(path(sales_orders_path()))
        .respond_with(ResponseTemplate::new(400).set_body_json(error_body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = ExactClient::new(&exact_config(&server), http_client());
    match client.create_sales_order("tok", &sample_payload()).await {
        Err(BridgeError::Upstream { status, body }) => {
            assert_eq!(status, 400);
            assert_eq!(body, error_body);
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_on_submission_is_not_resent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(sales_orders_path()))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = ExactClient::new(&exact_config(&server), http_client());
    let err = client.create_sales_order("tok", &sample_payload()).await.unwrap_err();

    assert!(matches!(err, BridgeError::Upstream { status: 503, .. }));
}

#[tokio::test]
async fn non_json_success_body_is_echoed_as_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(sales_orders_path()))
        .respond_with(ResponseTemplate::new(201).set_body_string("<feed>created</feed>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ExactClient::new(&exact_config(&server), http_client());
    let body = client.create_sales_order("tok", &sample_payload()).await.unwrap();

    assert_eq!(body, json!("<feed>created</feed>"));
}

#[tokio::test]
async fn server_error_on_lookup_is_sent_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(accounts_path()))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let exact = ExactIntegration::from_config(&exact_config(&server)).expect("integration");
    let err = exact.client.resolve_account("tok", "D100").await.unwrap_err();

    assert!(matches!(err, BridgeError::Upstream { status: 503, .. }));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn integration_shares_one_token_across_adapters() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "a1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(accounts_path()))
        .and(header("authorization", "Bearer a1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"d": {"results": [{"ID": "guid-1"}]}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let exact = ExactIntegration::from_config(&exact_config(&server)).expect("integration");
    let token = exact.tokens.access_token().await.unwrap();
    let again = exact.tokens.access_token().await.unwrap();

    assert_eq!(token, again);
    assert_eq!(exact.client.resolve_account(&token, "D100").await.unwrap(), "guid-1");
}
