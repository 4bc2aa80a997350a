//! In-process cart store backed by a concurrent map

use super::CartStore;
use crate::cart::models::Cart;
use crate::error::StoreError;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// A stored document together with its insertion sequence number
#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    cart: Cart,
}

/// Cart documents keyed by id.
///
/// DashMap allows concurrent access without external Mutexes. Each save is
/// atomic per document; nothing coordinates the read-then-save pairs issued
/// by concurrent requests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    carts: DashMap<Uuid, Entry>,
    next_seq: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.carts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn find_active(&self, user_id: &str) -> Result<Option<Cart>, StoreError> {
        Ok(self
            .carts
            .iter()
            .filter(|e| e.cart.user_id == user_id && e.cart.is_active())
            .min_by_key(|e| e.seq)
            .map(|e| e.cart.clone()))
    }

    async fn find_all(&self) -> Result<Vec<Cart>, StoreError> {
        let mut entries: Vec<Entry> = self.carts.iter().map(|e| e.value().clone()).collect();
        entries.sort_by_key(|e| e.seq);
        Ok(entries.into_iter().map(|e| e.cart).collect())
    }

    async fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        self.carts
            .entry(cart.id)
            .and_modify(|e| e.cart = cart.clone())
            .or_insert_with(|| Entry {
                seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                cart: cart.clone(),
            });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::models::CartItem;

    #[tokio::test]
    async fn save_inserts_then_replaces() {
        let store = MemoryStore::new();
        let mut cart = Cart::new_active("U1");
        assert!(store.is_empty());

        store.save(&cart).await.unwrap();
        assert!(!store.is_empty());
        cart.items.push(CartItem::new("P1", 1));
        store.save(&cart).await.unwrap();

        assert_eq!(store.len(), 1);
        let found = store.find_active("U1").await.unwrap().unwrap();
        assert_eq!(found.items, vec![CartItem::new("P1", 1)]);
    }

    #[tokio::test]
    async fn find_all_preserves_insertion_order() {
        let store = MemoryStore::new();
        let users = ["U3", "U1", "U2"];
        for user in users {
            store.save(&Cart::new_active(user)).await.unwrap();
        }

        let listed: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.user_id)
            .collect();

        assert_eq!(listed, users);
    }

    #[tokio::test]
    async fn find_active_picks_the_oldest_duplicate() {
        let store = MemoryStore::new();
        let first = Cart::new_active("U1");
        let second = Cart::new_active("U1");
        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();

        let found = store.find_active("U1").await.unwrap().unwrap();

        assert_eq!(found.id, first.id);
        assert!(store.find_active("nobody").await.unwrap().is_none());
    }
}
