//! Shopping Cart Business Logic Helpers
//!
//! This module contains the pure item-list operations used by the cart
//! service, plus request validation and formatting helpers.

use super::models::{AddItemBody, AddItemRequest, CartItem, RemoveItemBody, RemoveItemRequest};
use crate::error::CartError;
use serde_json::Value;

/// Quantity used when the add request carries none
pub const DEFAULT_QUANTITY: i64 = 1;

/// Adds `quantity` of `product_id` to `items`.
///
/// # Behaviour
///
/// * If an entry with the same product already exists, its `quantity` is
///   increased by the incoming quantity (saturating at the integer bounds).
/// * Otherwise a new entry is appended, keeping the existing order intact.
///
/// This function mutates `items` in-place.
pub fn merge_item(items: &mut Vec<CartItem>, product_id: &str, quantity: i64) {
    if let Some(existing) = items.iter_mut().find(|i| i.product_id == product_id) {
        existing.quantity = existing.quantity.saturating_add(quantity);
    } else {
        items.push(CartItem::new(product_id, quantity));
    }
}

/// Removes the first entry for `product_id`, preserving the relative order of
/// the rest. Returns the removed entry, or `None` when the product is absent.
pub fn remove_item(items: &mut Vec<CartItem>, product_id: &str) -> Option<CartItem> {
    let index = items.iter().position(|i| i.product_id == product_id)?;
    Some(items.remove(index))
}

/// Best-effort integer coercion of a submitted quantity.
///
/// Missing or `null` yields [`DEFAULT_QUANTITY`]. Numbers are truncated toward
/// zero; values outside the `i64` range are rejected rather than clamped.
/// Strings are read like a lenient integer parser: leading whitespace, an
/// optional sign, then the leading digits (`"3 boxes"` is 3, `"0x1f"` is 31).
pub fn coerce_quantity(raw: Option<&Value>) -> Result<i64, CartError> {
    match raw {
        None | Some(Value::Null) => Ok(DEFAULT_QUANTITY),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(truncate_in_range))
            .ok_or(CartError::InvalidQuantity),
        Some(Value::String(s)) => parse_leading_int(s).ok_or(CartError::InvalidQuantity),
        Some(_) => Err(CartError::InvalidQuantity),
    }
}

/// `i64::MAX as f64` rounds up to 2^63, hence the exclusive upper bound
fn truncate_in_range(f: f64) -> Option<i64> {
    let t = f.trunc();
    (t >= i64::MIN as f64 && t < i64::MAX as f64).then_some(t as i64)
}

fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&digits[..end], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Treats absent and empty strings alike
fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

/// Validates a raw add body into an [`AddItemRequest`].
///
/// Required fields are checked before the quantity is coerced.
pub fn validate_add_body(body: AddItemBody) -> Result<AddItemRequest, CartError> {
    let (Some(product_id), Some(user)) = (non_empty(body.product_id), non_empty(body.user)) else {
        return Err(CartError::MissingAddFields);
    };
    let quantity = coerce_quantity(body.quantity.as_ref())?;

    Ok(AddItemRequest {
        product_id,
        quantity,
        user,
    })
}

/// Validates a raw remove body plus the path's product id
pub fn validate_remove_body(
    product_id: String,
    body: RemoveItemBody,
) -> Result<RemoveItemRequest, CartError> {
    let user = non_empty(body.user).ok_or(CartError::MissingUser)?;
    Ok(RemoveItemRequest { product_id, user })
}

/// Produces a human-readable one-line summary for a list of cart items.
///
/// Example output: `"2x P1, 1x P2"`.
pub fn format_item_summary(items: &[CartItem]) -> String {
    items
        .iter()
        .map(|i| format!("{}x {}", i.quantity, i.product_id))
        .collect::<Vec<_>>()
        .join(", ")
}
