//! Inbound order document as posted by the assistant.
//!
//! Every field is optional on the wire so that a half-filled document still
//! decodes and the mapper can report exactly what is missing.

use serde::{Deserialize, Serialize};

/// Customer reference plus order body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderRequest {
    #[serde(default)]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub order: Option<OrderDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub debtor_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    #[serde(default)]
    pub order_number: Option<String>,
    /// `YYYY-MM-DD`; today is used when absent.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub lines: Option<Vec<OrderLine>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    #[serde(default)]
    pub item_code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl OrderRequest {
    /// Debtor code with surrounding whitespace removed, if one was supplied.
    pub fn debtor_code(&self) -> Option<&str> {
        self.customer
            .as_ref()
            .and_then(|c| c.debtor_code.as_deref())
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }

    /// Number of order lines, zero when the order body is missing.
    pub fn line_count(&self) -> usize {
        self.order.as_ref().and_then(|o| o.lines.as_ref()).map_or(0, Vec::len)
    }
}

impl OrderLine {
    /// Item code exactly as supplied, unless it is missing or blank.
    pub fn item_code(&self) -> Option<&str> {
        self.item_code.as_deref().filter(|code| !code.trim().is_empty())
    }
}
