//! `POST /api/orders/exact`
//!
//! Every outcome other than an accepted order is answered with HTTP 500 and
//! `{success: false, message, error?}`, including a body that is not valid
//! JSON and the retry-requested case after a rejected token.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use orderbridge_core::ForwardOutcome;
use orderbridge_domain::{BridgeError, OrderRequest};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::utils::logging::log_request_outcome;

const ROUTE: &str = "orders::forward_order";

pub const SUBMITTED_MESSAGE: &str = "Order sent to Exact";
pub const RETRY_MESSAGE: &str = "Access token refreshed, please send the order again.";
pub const FAILURE_MESSAGE: &str = "Failed to send order to Exact";

/// JSON envelope returned by the order endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_response: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl ForwardResponse {
    fn submitted(exact_response: Value) -> Self {
        Self {
            success: true,
            message: SUBMITTED_MESSAGE.to_string(),
            exact_response: Some(exact_response),
            error: None,
        }
    }

    fn retry(refresh_error: Option<&BridgeError>) -> Self {
        Self {
            success: false,
            message: RETRY_MESSAGE.to_string(),
            exact_response: None,
            error: refresh_error.map(BridgeError::detail),
        }
    }

    fn failed(error: &BridgeError) -> Self {
        Self {
            success: false,
            message: FAILURE_MESSAGE.to_string(),
            exact_response: None,
            error: Some(error.detail()),
        }
    }

    fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Forward the posted order to Exact Online.
pub async fn forward_order(
    State(context): State<Arc<AppContext>>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> Response {
    let started = Instant::now();

    let order = match payload {
        Ok(Json(order)) => order,
        Err(rejection) => {
            let error = BridgeError::Validation(rejection.body_text());
            log_request_outcome(ROUTE, started.elapsed(), false, Some(error.label()));
            return ForwardResponse::failed(&error)
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };
    debug!(?order, "inbound order");

    match context.forwarding.forward(&order).await {
        Ok(ForwardOutcome::Submitted(body)) => {
            log_request_outcome(ROUTE, started.elapsed(), true, None);
            ForwardResponse::submitted(body).into_response_with(StatusCode::OK)
        }
        Ok(ForwardOutcome::RetryRequested { refresh_error }) => {
            if let Some(err) = &refresh_error {
                warn!(error = %err, "token refresh after rejection failed");
            }
            log_request_outcome(ROUTE, started.elapsed(), false, Some("retry_requested"));
            ForwardResponse::retry(refresh_error.as_ref())
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
        Err(err) => {
            log_request_outcome(ROUTE, started.elapsed(), false, Some(err.label()));
            ForwardResponse::failed(&err).into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
