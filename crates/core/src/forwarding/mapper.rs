//! Maps an inbound order document onto the Exact Online sales-order schema.

use chrono::NaiveDate;
use orderbridge_domain::constants::{
    DEFAULT_LINE_PRICE, DEFAULT_LINE_QUANTITY, DEFAULT_ORDER_NUMBER, ORDER_DATE_FORMAT,
};
use orderbridge_domain::{
    BridgeError, OrderDetails, OrderLine, OrderRequest, Result, SalesOrderLine, SalesOrderPayload,
};

/// Check the document structure without building anything.
///
/// Runs before any network call so a malformed order never costs a token
/// refresh or an account lookup.
///
/// # Errors
/// `BridgeError::Validation` when the order body or its lines are missing, or
/// when a line has no item code (reported with its 1-based index).
pub fn validate_order(order: &OrderRequest) -> Result<()> {
    let (_, lines) = order_parts(order)?;
    for (index, line) in lines.iter().enumerate() {
        item_code(line, index)?;
    }
    Ok(())
}

/// Build the sales-order payload for `account`.
///
/// Absent fields fall back to: order number `GPT-ORDER`, order date `today`,
/// empty line description, quantity 1 and unit price 0.
///
/// # Errors
/// Same conditions as [`validate_order`].
pub fn build_payload(
    order: &OrderRequest,
    account: &str,
    today: NaiveDate,
) -> Result<SalesOrderPayload> {
    let (details, lines) = order_parts(order)?;

    let sales_order_lines = lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            Ok(SalesOrderLine {
                item: item_code(line, index)?.to_string(),
                description: line.description.clone().unwrap_or_default(),
                quantity: line
                    .quantity
                    .filter(|q| q.abs() > f64::EPSILON)
                    .unwrap_or(DEFAULT_LINE_QUANTITY),
                unit_price: line.price.unwrap_or(DEFAULT_LINE_PRICE),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let order_number = non_blank(details.order_number.as_deref()).unwrap_or(DEFAULT_ORDER_NUMBER);
    let order_date = non_blank(details.date.as_deref())
        .map_or_else(|| today.format(ORDER_DATE_FORMAT).to_string(), str::to_string);

    Ok(SalesOrderPayload {
        order_date,
        description: format!("Order {order_number}"),
        ordered_by: account.to_string(),
        sales_order_lines,
    })
}

fn order_parts(order: &OrderRequest) -> Result<(&OrderDetails, &[OrderLine])> {
    let details = order
        .order
        .as_ref()
        .ok_or_else(|| BridgeError::Validation("order data is missing or invalid".into()))?;
    let lines = details
        .lines
        .as_deref()
        .ok_or_else(|| BridgeError::Validation("order data is missing or invalid".into()))?;
    Ok((details, lines))
}

fn item_code(line: &OrderLine, index: usize) -> Result<&str> {
    line.item_code()
        .ok_or_else(|| BridgeError::Validation(format!("itemCode missing on line {}", index + 1)))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
