use async_trait::async_trait;
use common::{RestaurantId, UserId};

use crate::{
    Result,
    model::{Order, Restaurant, User},
    query::{SearchFilter, SortField},
};

/// Read access to the restaurant catalogue.
///
/// The search path only ever reads; all implementations must be
/// thread-safe (Send + Sync).
#[async_trait]
pub trait RestaurantStore: Send + Sync {
    /// Fetches a single restaurant by id.
    async fn get_restaurant(&self, id: RestaurantId) -> Result<Option<Restaurant>>;

    /// Counts restaurants matching the filter.
    async fn count_restaurants(&self, filter: &SearchFilter) -> Result<u64>;

    /// Fetches a window of restaurants matching the filter, sorted
    /// ascending by the given field with ties broken by id.
    async fn find_restaurants(
        &self,
        filter: &SearchFilter,
        sort: SortField,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Restaurant>>;
}

/// Read access to user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks a user up by the externally-issued subject identifier.
    async fn find_user_by_subject(&self, subject: &str) -> Result<Option<User>>;
}

/// Order persistence for the guarded order routes.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Records a new order.
    async fn insert_order(&self, order: Order) -> Result<()>;

    /// Lists a user's orders, newest first.
    async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>>;
}
