//! Domain types and models

pub mod order;
pub mod sales_order;

pub use order::{Customer, OrderDetails, OrderLine, OrderRequest};
pub use sales_order::{AccountId, SalesOrderLine, SalesOrderPayload};
