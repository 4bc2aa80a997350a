//! Shopping Cart Domain Module
//!
//! This module contains all shopping cart business logic, including:
//! - Domain models (Cart, CartItem, request bodies, response envelopes)
//! - Business logic helpers (item merging and removal, quantity coercion)
//! - The cart service over an injected store
//! - Application state management
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod service;
pub mod state;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use service::CartService;
pub use state::{AppState, SharedState};
