//! Cart persistence
//!
//! The service only needs three document operations: find the active cart of
//! a user, list every cart, and save (insert or replace) a cart. Backends
//! implement [`CartStore`] and are handed to the service at startup:
//! [`PgStore`] when a database URL is configured, [`MemoryStore`] otherwise.

pub mod memory;
pub mod postgres;

use crate::cart::models::Cart;
use crate::error::StoreError;
use async_trait::async_trait;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait CartStore: Send + Sync {
    /// Returns the first active cart owned by `user_id`, in insertion order.
    async fn find_active(&self, user_id: &str) -> Result<Option<Cart>, StoreError>;

    /// Returns every cart regardless of owner or status, in insertion order.
    async fn find_all(&self) -> Result<Vec<Cart>, StoreError>;

    /// Inserts `cart`, or replaces the stored document with the same id.
    async fn save(&self, cart: &Cart) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn CartStore) {}
    }
}
