//! Exact Online sales-order creation schema.

use serde::{Deserialize, Serialize};

/// Exact Online account GUID (`OrderedBy`).
pub type AccountId = String;

/// Body of `POST /api/v1/{division}/salesorder/SalesOrders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SalesOrderPayload {
    pub order_date: String,
    pub description: String,
    pub ordered_by: AccountId,
    pub sales_order_lines: Vec<SalesOrderLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SalesOrderLine {
    pub item: String,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}
