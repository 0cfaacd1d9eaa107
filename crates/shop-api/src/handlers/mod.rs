//! Route handlers
//!
//! HTTP request handlers organized by resource.

pub mod auth;
pub mod cart;
pub mod dashboard;
pub mod favorites;
pub mod health;
pub mod orders;
pub mod products;
pub mod users;
