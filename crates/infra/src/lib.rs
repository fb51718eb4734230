//! # OrderBridge Infrastructure
//!
//! Infrastructure implementations of core forwarding ports.
//!
//! This crate contains:
//! - Configuration loading (environment, TOML/JSON files)
//! - HTTP client with retries for idempotent requests
//! - The Exact Online integration (OAuth token store, REST client)
//!
//! ## Architecture
//! - Implements traits defined in `orderbridge-core`
//! - Depends on `orderbridge-domain` and `orderbridge-core`
//! - Contains all "impure" code (network, environment, filesystem)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::*;
pub use integrations::*;
