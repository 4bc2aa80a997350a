//! Cart operations over an injected store

use super::helpers::{format_item_summary, merge_item, remove_item};
use super::models::{AddItemRequest, Cart, RemoveItemRequest};
use crate::error::{CartAction, CartError};
use crate::store::CartStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

/// Add, list and remove operations on carts.
///
/// Every call is a read followed by at most one save; concurrent calls for
/// the same user are not coordinated.
#[derive(Clone)]
pub struct CartService {
    store: Arc<dyn CartStore>,
}

impl CartService {
    pub fn new(store: Arc<dyn CartStore>) -> Self {
        Self { store }
    }

    /// Adds an item to the user's active cart, creating the cart if needed.
    #[instrument(skip(self, request), fields(user = %request.user, product_id = %request.product_id))]
    pub async fn add_item(&self, request: AddItemRequest) -> Result<Cart, CartError> {
        let mut cart = match self
            .store
            .find_active(&request.user)
            .await
            .map_err(CartError::store(CartAction::AddItem))?
        {
            Some(cart) => cart,
            None => {
                info!("Creating active cart");
                Cart::new_active(request.user)
            }
        };

        merge_item(&mut cart.items, &request.product_id, request.quantity);
        cart.updated_at = Utc::now();

        self.store
            .save(&cart)
            .await
            .map_err(CartError::store(CartAction::AddItem))?;

        info!(cart_id = %cart.id, items = %format_item_summary(&cart.items), "Item added to cart");
        Ok(cart)
    }

    /// Returns every stored cart, unfiltered.
    #[instrument(skip(self))]
    pub async fn list_carts(&self) -> Result<Vec<Cart>, CartError> {
        self.store
            .find_all()
            .await
            .map_err(CartError::store(CartAction::ListCarts))
    }

    /// Removes one product entry from the user's active cart.
    ///
    /// `updated_at` is left as it was.
    #[instrument(skip(self, request), fields(user = %request.user, product_id = %request.product_id))]
    pub async fn remove_item(&self, request: RemoveItemRequest) -> Result<Cart, CartError> {
        let mut cart = self
            .store
            .find_active(&request.user)
            .await
            .map_err(CartError::store(CartAction::RemoveItem))?
            .ok_or(CartError::CartNotFound)?;

        remove_item(&mut cart.items, &request.product_id).ok_or(CartError::ProductNotFound)?;

        self.store
            .save(&cart)
            .await
            .map_err(CartError::store(CartAction::RemoveItem))?;

        info!(cart_id = %cart.id, remaining = cart.items.len(), "Product removed from cart");
        Ok(cart)
    }
}
