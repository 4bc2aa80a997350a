//! Cart Service Library
//!
//! This library provides a small shopping-cart REST service: add an item to a
//! user's active cart, list all carts, and remove an item.

// Domain modules
pub mod cart;
pub mod error;
pub mod store;

// Infrastructure
pub mod config;
pub mod router;
pub mod telemetry;
