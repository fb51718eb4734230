//! Order forwarding to the accounting platform

pub mod mapper;
pub mod ports;
pub mod service;

pub use ports::*;
pub use service::*;
