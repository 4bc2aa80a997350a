//! Error types for the cart service and their HTTP mapping

use crate::cart::models::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Failure reported by a cart store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// The operation that hit a store failure, used to pick the response message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    AddItem,
    ListCarts,
    RemoveItem,
}

impl CartAction {
    fn failure_message(self) -> &'static str {
        match self {
            CartAction::AddItem => "Failed to add item to cart",
            CartAction::ListCarts => "Failed to fetch cart data",
            CartAction::RemoveItem => "Failed to remove product from cart",
        }
    }
}

#[derive(Debug, Error)]
pub enum CartError {
    #[error("ProductId and user are required")]
    MissingAddFields,

    #[error("User is required")]
    MissingUser,

    #[error("Quantity must be an integer")]
    InvalidQuantity,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Active cart not found for user")]
    CartNotFound,

    #[error("Product not found in cart")]
    ProductNotFound,

    #[error("{}: {source}", .action.failure_message())]
    Store {
        action: CartAction,
        #[source]
        source: StoreError,
    },
}

impl CartError {
    /// Wraps a store failure raised while performing `action`
    pub fn store(action: CartAction) -> impl FnOnce(StoreError) -> CartError {
        move |source| CartError::Store { action, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            CartError::MissingAddFields
            | CartError::MissingUser
            | CartError::InvalidQuantity
            | CartError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            CartError::CartNotFound | CartError::ProductNotFound => StatusCode::NOT_FOUND,
            CartError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            CartError::Store { action, source } => {
                tracing::error!(error = %source, action = ?action, "Cart store operation failed");
                ErrorResponse {
                    success: false,
                    message: action.failure_message().to_string(),
                    error: Some(source.to_string()),
                }
            }
            other => {
                tracing::warn!(status = %status, "Rejecting cart request: {}", other);
                ErrorResponse {
                    success: false,
                    message: other.to_string(),
                    error: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_taxonomy() {
        assert_eq!(
            CartError::MissingAddFields.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(CartError::MissingUser.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(CartError::CartNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            CartError::ProductNotFound.status_code(),
            StatusCode::NOT_FOUND
        );

        let err = CartError::store(CartAction::ListCarts)(StoreError::Backend("down".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to fetch cart data: down");
    }
}
