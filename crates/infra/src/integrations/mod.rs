//! External service integrations

pub mod exact;

pub use exact::{ExactClient, ExactIntegration, ExactTokenManager};
