//! Liveness probe

use axum::Json;
use serde_json::{json, Value};

/// `GET /health`: the process is up and serving requests.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
