//! Shared types used across the restaurant platform crates.

pub mod types;

pub use types::{OrderId, RestaurantId, UserId};
