//! Catalogue storage for the restaurant platform.
//!
//! Defines the entity records, the tagged filter-clause type used by the
//! search path, the storage traits, and two adapters: an in-memory store
//! for tests and default runs, and a PostgreSQL store.

pub mod error;
pub mod memory;
pub mod model;
pub mod postgres;
pub mod query;
pub mod store;

pub use common::{OrderId, RestaurantId, UserId};
pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use model::{CartItem, MenuItem, Order, OrderStatus, Restaurant, User};
pub use postgres::PostgresStore;
pub use query::{Clause, SearchFilter, SortField};
pub use store::{OrderStore, RestaurantStore, UserStore};
