//! Shopping Cart Domain Models
//!
//! This module contains the persisted cart document, the raw request bodies
//! accepted by the HTTP layer, their validated counterparts, and the JSON
//! response envelopes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// =============================================================================
// Cart Domain Models
// =============================================================================

/// Lifecycle discriminator of a cart document.
///
/// Only `active` carts are visible to the add and remove paths. No transition
/// out of `active` exists yet.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CartStatus {
    #[default]
    Active,
}

impl CartStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CartStatus::Active => "active",
        }
    }
}

impl std::str::FromStr for CartStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CartStatus::Active),
            other => Err(format!("unknown cart status `{}`", other)),
        }
    }
}

/// One `{productId, quantity}` entry of a cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Identifier of the product
    pub product_id: String,

    /// Quantity of this product in the cart
    pub quantity: i64,
}

impl CartItem {
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// A persisted cart document.
///
/// A user may own several carts over time; at most one of them is expected
/// to be `active`, but the store does not enforce it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Document identifier
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// Owning user
    pub user_id: String,

    pub status: CartStatus,

    /// Items in insertion order, one entry per product
    pub items: Vec<CartItem>,

    /// Stamped on creation and on every add, never on remove
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Creates an empty active cart for `user_id`
    pub fn new_active(user_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            status: CartStatus::Active,
            items: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == CartStatus::Active
    }
}

// =============================================================================
// Request Bodies
// =============================================================================

/// Raw body of `POST /cart/add`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemBody {
    pub product_id: Option<String>,

    /// Number or numeric string, coerced to an integer (defaults to 1)
    pub quantity: Option<Value>,

    pub user: Option<String>,
}

/// Raw body of `DELETE /cart/:productId`
#[derive(Debug, Default, Deserialize)]
pub struct RemoveItemBody {
    pub user: Option<String>,
}

/// Validated input of the Add Item operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItemRequest {
    pub product_id: String,
    pub quantity: i64,
    pub user: String,
}

/// Validated input of the Remove Item operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveItemRequest {
    pub product_id: String,
    pub user: String,
}

// =============================================================================
// Response Envelopes
// =============================================================================

/// Success envelope carrying a single cart
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub success: bool,
    pub message: &'static str,
    pub data: Cart,
}

impl CartResponse {
    pub fn new(message: &'static str, data: Cart) -> Self {
        Self {
            success: true,
            message,
            data,
        }
    }
}

/// Success envelope of the cart listing
#[derive(Debug, Serialize)]
pub struct CartListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Cart>,
}

impl From<Vec<Cart>> for CartListResponse {
    fn from(data: Vec<Cart>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// Failure envelope; `error` is only present for unexpected failures
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cart_serializes_with_document_field_names() {
        let mut cart = Cart::new_active("U1");
        cart.items.push(CartItem::new("P1", 2));

        let value = serde_json::to_value(&cart).unwrap();

        assert_eq!(value["_id"], json!(cart.id.to_string()));
        assert_eq!(value["userId"], "U1");
        assert_eq!(value["status"], "active");
        assert_eq!(value["items"], json!([{ "productId": "P1", "quantity": 2 }]));
        assert!(value["updatedAt"].is_string());
    }

    #[test]
    fn add_body_accepts_string_quantity_and_missing_fields() {
        let body: AddItemBody =
            serde_json::from_value(json!({ "productId": "P1", "quantity": "3" })).unwrap();

        assert_eq!(body.product_id.as_deref(), Some("P1"));
        assert_eq!(body.quantity, Some(json!("3")));
        assert!(body.user.is_none());
    }
}
