//! # OrderBridge API
//!
//! HTTP application layer - routes and main entry point.
//!
//! This crate contains:
//! - axum routes (`POST /api/orders/exact`, `GET /health`)
//! - Application context (dependency injection)
//! - Tracing setup for the binary
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires the Exact Online adapters into the forwarding service
//! - Converts every outcome into the JSON response envelope

pub mod context;
pub mod routes;
pub mod utils;

// Re-export for convenience
pub use context::AppContext;
pub use routes::router;
