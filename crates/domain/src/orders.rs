//! Order placement: price a cart against a restaurant's menu and record it.

use chrono::Utc;
use common::{OrderId, RestaurantId, UserId};
use serde::Deserialize;
use store::{CartItem, Order, OrderStatus, OrderStore, Restaurant, RestaurantStore};

use crate::error::DomainError;

/// A cart submitted at checkout, referencing a restaurant and its menu
/// items by name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutCart {
    pub restaurant_id: RestaurantId,
    pub items: Vec<CartItem>,
}

/// Places and lists orders on behalf of a resolved user.
#[derive(Debug, Clone)]
pub struct OrderService<S> {
    store: S,
}

impl<S: RestaurantStore + OrderStore> OrderService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Prices the cart against the restaurant's current menu and records
    /// the order with status `placed`.
    ///
    /// Line prices always come from the stored menu, never from the
    /// submitted cart. An item name the menu does not carry fails the
    /// whole checkout.
    #[tracing::instrument(skip(self, cart), fields(user_id = %user_id, restaurant_id = %cart.restaurant_id))]
    pub async fn checkout(&self, user_id: UserId, cart: CheckoutCart) -> Result<Order, DomainError> {
        let restaurant = self
            .store
            .get_restaurant(cart.restaurant_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "restaurant",
                id: cart.restaurant_id.to_string(),
            })?;

        let total_cents = price_cart(&restaurant, &cart.items)?;

        let order = Order {
            id: OrderId::new(),
            user_id,
            restaurant_id: restaurant.id,
            status: OrderStatus::Placed,
            cart: cart.items,
            total_cents,
            created_at: Utc::now(),
        };
        self.store.insert_order(order.clone()).await?;

        metrics::counter!("orders_placed_total").increment(1);
        tracing::info!(order_id = %order.id, total_cents, "order placed");
        Ok(order)
    }

    /// Orders belonging to the user, newest first.
    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    pub async fn orders_for(&self, user_id: UserId) -> Result<Vec<Order>, DomainError> {
        Ok(self.store.orders_for_user(user_id).await?)
    }
}

fn price_cart(restaurant: &Restaurant, items: &[CartItem]) -> Result<i64, DomainError> {
    let mut total = restaurant.delivery_price_cents;
    for item in items {
        let menu_item = restaurant
            .menu_items
            .iter()
            .find(|m| m.name == item.menu_item_name)
            .ok_or_else(|| DomainError::NotFound {
                entity: "menu item",
                id: item.menu_item_name.clone(),
            })?;
        total += menu_item.price_cents * i64::from(item.quantity);
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use store::{InMemoryStore, MenuItem};

    use super::*;

    fn curry_house() -> Restaurant {
        Restaurant {
            id: RestaurantId::new(),
            name: "Curry House".to_string(),
            city: "London".to_string(),
            country: "UK".to_string(),
            cuisines: vec!["Indian".to_string()],
            menu_items: vec![
                MenuItem {
                    name: "Korma".to_string(),
                    price_cents: 1100,
                },
                MenuItem {
                    name: "Naan".to_string(),
                    price_cents: 300,
                },
            ],
            delivery_price_cents: 250,
            estimated_delivery_minutes: 30,
            image_url: String::new(),
            last_updated: Utc::now(),
        }
    }

    #[tokio::test]
    async fn checkout_prices_cart_from_stored_menu() {
        let store = InMemoryStore::new();
        let restaurant = curry_house();
        let restaurant_id = restaurant.id;
        store.insert_restaurant(restaurant).await;
        let service = OrderService::new(store.clone());

        let user_id = UserId::new();
        let order = service
            .checkout(
                user_id,
                CheckoutCart {
                    restaurant_id,
                    items: vec![
                        CartItem {
                            menu_item_name: "Korma".to_string(),
                            quantity: 2,
                        },
                        CartItem {
                            menu_item_name: "Naan".to_string(),
                            quantity: 1,
                        },
                    ],
                },
            )
            .await
            .unwrap();

        // 2 * 1100 + 300 + 250 delivery
        assert_eq!(order.total_cents, 2750);
        assert_eq!(order.status, OrderStatus::Placed);
        assert_eq!(order.user_id, user_id);

        let listed = service.orders_for(user_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, order.id);
    }

    #[tokio::test]
    async fn checkout_rejects_unknown_restaurant() {
        let service = OrderService::new(InMemoryStore::new());
        let err = service
            .checkout(
                UserId::new(),
                CheckoutCart {
                    restaurant_id: RestaurantId::new(),
                    items: Vec::new(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound {
                entity: "restaurant",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn checkout_rejects_unknown_menu_item() {
        let store = InMemoryStore::new();
        let restaurant = curry_house();
        let restaurant_id = restaurant.id;
        store.insert_restaurant(restaurant).await;
        let service = OrderService::new(store);

        let err = service
            .checkout(
                UserId::new(),
                CheckoutCart {
                    restaurant_id,
                    items: vec![CartItem {
                        menu_item_name: "Sushi".to_string(),
                        quantity: 1,
                    }],
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound {
                entity: "menu item",
                ..
            }
        ));
    }
}
