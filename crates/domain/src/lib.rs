//! Domain layer for the restaurant platform.
//!
//! This crate provides the search core and order placement:
//! - SearchCriteria turns raw query parameters into a filter conjunction
//! - SearchService executes a filter + sort + page window against the store
//! - PageEnvelope carries a result page with pagination metadata
//! - OrderService records orders for the guarded order routes

pub mod criteria;
pub mod error;
pub mod orders;
pub mod page;
pub mod search;

pub use criteria::{SearchCriteria, SearchParams};
pub use error::DomainError;
pub use orders::{CheckoutCart, OrderService};
pub use page::{PAGE_SIZE, PageEnvelope};
pub use search::{SearchOutcome, SearchService};
