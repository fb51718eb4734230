//! # OrderBridge Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for the accounting platform
//! - The order-to-sales-order mapper
//! - The forwarding service driving one request through its stages
//!
//! ## Architecture Principles
//! - Only depends on `orderbridge-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod forwarding;

// Re-export specific items to avoid ambiguity
pub use forwarding::mapper::{build_payload, validate_order};
pub use forwarding::ports::{AccessToken, AccessTokenProvider, AccountDirectory, SalesOrderGateway};
pub use forwarding::service::{ForwardOutcome, ForwardStage, OrderForwardingService};
