use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    Result,
    model::{Order, Restaurant, User},
    query::{SearchFilter, SortField},
    store::{OrderStore, RestaurantStore, UserStore},
};
use common::{RestaurantId, UserId};

/// In-memory store implementation for tests and default runs.
///
/// Holds all records behind `RwLock`s and evaluates filters with
/// [`SearchFilter::matches`], providing the same interface as the
/// PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    restaurants: Arc<RwLock<Vec<Restaurant>>>,
    users: Arc<RwLock<Vec<User>>>,
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a restaurant record.
    pub async fn insert_restaurant(&self, restaurant: Restaurant) {
        self.restaurants.write().await.push(restaurant);
    }

    /// Adds a user record.
    pub async fn insert_user(&self, user: User) {
        self.users.write().await.push(user);
    }

    /// Clears all records.
    pub async fn clear(&self) {
        self.restaurants.write().await.clear();
        self.users.write().await.clear();
        self.orders.write().await.clear();
    }
}

fn sort_restaurants(restaurants: &mut [Restaurant], sort: SortField) {
    restaurants.sort_by(|a, b| {
        let key = match sort {
            SortField::LastUpdated => a.last_updated.cmp(&b.last_updated),
            SortField::DeliveryPrice => a.delivery_price_cents.cmp(&b.delivery_price_cents),
            SortField::EstimatedDeliveryTime => a
                .estimated_delivery_minutes
                .cmp(&b.estimated_delivery_minutes),
        };
        // Ties broken by id so identical requests return identical pages.
        key.then(a.id.as_uuid().cmp(&b.id.as_uuid()))
    });
}

#[async_trait]
impl RestaurantStore for InMemoryStore {
    async fn get_restaurant(&self, id: RestaurantId) -> Result<Option<Restaurant>> {
        let restaurants = self.restaurants.read().await;
        Ok(restaurants.iter().find(|r| r.id == id).cloned())
    }

    async fn count_restaurants(&self, filter: &SearchFilter) -> Result<u64> {
        let restaurants = self.restaurants.read().await;
        Ok(restaurants.iter().filter(|r| filter.matches(r)).count() as u64)
    }

    async fn find_restaurants(
        &self,
        filter: &SearchFilter,
        sort: SortField,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Restaurant>> {
        let restaurants = self.restaurants.read().await;
        let mut matching: Vec<Restaurant> = restaurants
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        sort_restaurants(&mut matching, sort);
        Ok(matching.into_iter().skip(skip).take(limit).collect())
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_user_by_subject(&self, subject: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.subject == subject).cloned())
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn insert_order(&self, order: Order) -> Result<()> {
        self.orders.write().await.push(order);
        Ok(())
    }

    async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut mine: Vec<Order> = orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(mine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CartItem, MenuItem, OrderStatus};
    use chrono::{Duration, Utc};
    use common::OrderId;

    fn restaurant(name: &str, city: &str, cuisines: &[&str], minutes_ago: i64) -> Restaurant {
        Restaurant {
            id: RestaurantId::new(),
            name: name.to_string(),
            city: city.to_string(),
            country: "UK".to_string(),
            cuisines: cuisines.iter().map(|c| c.to_string()).collect(),
            menu_items: vec![MenuItem {
                name: "Special".to_string(),
                price_cents: 900,
            }],
            delivery_price_cents: 250,
            estimated_delivery_minutes: 30,
            image_url: String::new(),
            last_updated: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[tokio::test]
    async fn get_restaurant_by_id() {
        let store = InMemoryStore::new();
        let r = restaurant("Curry House", "London", &["Indian"], 0);
        let id = r.id;
        store.insert_restaurant(r).await;

        let found = store.get_restaurant(id).await.unwrap();
        assert_eq!(found.unwrap().name, "Curry House");

        let missing = store.get_restaurant(RestaurantId::new()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn count_applies_full_filter() {
        let store = InMemoryStore::new();
        store
            .insert_restaurant(restaurant("Curry House", "London", &["Indian"], 1))
            .await;
        store
            .insert_restaurant(restaurant("Pizza Napoli", "London", &["Italian"], 2))
            .await;
        store
            .insert_restaurant(restaurant("Bistro Lyon", "Paris", &["French"], 3))
            .await;

        let city_only = SearchFilter::for_city("london");
        assert_eq!(store.count_restaurants(&city_only).await.unwrap(), 2);

        let with_cuisine = SearchFilter::for_city("london").with_cuisines(vec!["indian".to_string()]);
        assert_eq!(store.count_restaurants(&with_cuisine).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn find_sorts_ascending_and_windows() {
        let store = InMemoryStore::new();
        // Inserted out of order; last_updated ascending is c, b, a.
        store
            .insert_restaurant(restaurant("A", "London", &["Indian"], 10))
            .await;
        store
            .insert_restaurant(restaurant("B", "London", &["Indian"], 20))
            .await;
        store
            .insert_restaurant(restaurant("C", "London", &["Indian"], 30))
            .await;

        let filter = SearchFilter::for_city("London");
        let page = store
            .find_restaurants(&filter, SortField::LastUpdated, 0, 2)
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name, "C");
        assert_eq!(page[1].name, "B");

        let rest = store
            .find_restaurants(&filter, SortField::LastUpdated, 2, 2)
            .await
            .unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].name, "A");
    }

    #[tokio::test]
    async fn find_is_deterministic_on_sort_ties() {
        let store = InMemoryStore::new();
        let now = Utc::now();
        for name in ["A", "B", "C", "D"] {
            let mut r = restaurant(name, "London", &["Indian"], 0);
            r.last_updated = now;
            store.insert_restaurant(r).await;
        }

        let filter = SearchFilter::for_city("London");
        let first = store
            .find_restaurants(&filter, SortField::LastUpdated, 0, 4)
            .await
            .unwrap();
        let second = store
            .find_restaurants(&filter, SortField::LastUpdated, 0, 4)
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn orders_listed_newest_first_per_user() {
        let store = InMemoryStore::new();
        let user_id = UserId::new();
        let restaurant_id = RestaurantId::new();
        let now = Utc::now();

        for (minutes_ago, total) in [(30, 1000), (10, 2000)] {
            store
                .insert_order(Order {
                    id: OrderId::new(),
                    user_id,
                    restaurant_id,
                    status: OrderStatus::Placed,
                    cart: vec![CartItem {
                        menu_item_name: "Special".to_string(),
                        quantity: 1,
                    }],
                    total_cents: total,
                    created_at: now - Duration::minutes(minutes_ago),
                })
                .await
                .unwrap();
        }
        store
            .insert_order(Order {
                id: OrderId::new(),
                user_id: UserId::new(),
                restaurant_id,
                status: OrderStatus::Placed,
                cart: vec![],
                total_cents: 500,
                created_at: now,
            })
            .await
            .unwrap();

        let mine = store.orders_for_user(user_id).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].total_cents, 2000);
        assert_eq!(mine[1].total_cents, 1000);
    }
}
