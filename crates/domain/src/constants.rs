//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

// Exact Online endpoints
pub const DEFAULT_EXACT_BASE_URL: &str = "https://start.exactonline.nl";
pub const EXACT_TOKEN_PATH: &str = "/api/oauth2/token";
pub const EXACT_ACCOUNTS_PATH: &str = "crm/Accounts";
pub const EXACT_SALES_ORDERS_PATH: &str = "salesorder/SalesOrders";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

// Order mapping defaults
pub const DEFAULT_ORDER_NUMBER: &str = "GPT-ORDER";
pub const DEFAULT_LINE_QUANTITY: f64 = 1.0;
pub const DEFAULT_LINE_PRICE: f64 = 0.0;
pub const ORDER_DATE_FORMAT: &str = "%Y-%m-%d";
