//! Shopping Cart State Management
//!
//! This module holds the application state shared by every request handler.

use super::service::CartService;
use crate::store::{CartStore, MemoryStore};
use std::sync::Arc;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state containing the cart service
pub struct AppState {
    /// Cart operations, bound to the store chosen at startup
    pub carts: CartService,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates an AppState backed by a fresh in-process store
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Creates an AppState over an explicitly constructed store
    pub fn with_store(store: Arc<dyn CartStore>) -> Self {
        Self {
            carts: CartService::new(store),
        }
    }
}
