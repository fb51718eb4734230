//! HTTP routes

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::context::AppContext;

pub mod health;
pub mod orders;

/// Router for every endpoint the bridge exposes.
pub fn router(context: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/orders/exact", post(orders::forward_order))
        .with_state(context)
}
