//! Entity records held by the catalogue store.

use chrono::{DateTime, Utc};
use common::{OrderId, RestaurantId, UserId};
use serde::{Deserialize, Serialize};

/// A single dish offered by a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: String,
    pub price_cents: i64,
}

/// A restaurant record. Read-only from the search path's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub city: String,
    pub country: String,
    pub cuisines: Vec<String>,
    pub menu_items: Vec<MenuItem>,
    pub delivery_price_cents: i64,
    pub estimated_delivery_minutes: i32,
    pub image_url: String,
    pub last_updated: DateTime<Utc>,
}

/// An internal user record, joined to bearer tokens by `subject`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Externally-issued subject identifier; unique, one-to-one with users.
    pub subject: String,
    pub email: String,
    pub name: Option<String>,
    pub address_line1: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Lifecycle of an order after checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderStatus {
    Placed,
    Paid,
    InProgress,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    /// The wire/storage name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Paid => "paid",
            OrderStatus::InProgress => "inProgress",
            OrderStatus::OutForDelivery => "outForDelivery",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// Parses a storage name back into a status.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "placed" => Some(OrderStatus::Placed),
            "paid" => Some(OrderStatus::Paid),
            "inProgress" => Some(OrderStatus::InProgress),
            "outForDelivery" => Some(OrderStatus::OutForDelivery),
            "delivered" => Some(OrderStatus::Delivered),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of an order's cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub menu_item_name: String,
    pub quantity: u32,
}

/// An order placed by a user against a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub restaurant_id: RestaurantId,
    pub status: OrderStatus,
    pub cart: Vec<CartItem>,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_roundtrips_through_storage_name() {
        for status in [
            OrderStatus::Placed,
            OrderStatus::Paid,
            OrderStatus::InProgress,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("shipped"), None);
    }

    #[test]
    fn restaurant_serializes_with_camel_case_fields() {
        let restaurant = Restaurant {
            id: RestaurantId::new(),
            name: "Thai Garden".to_string(),
            city: "London".to_string(),
            country: "UK".to_string(),
            cuisines: vec!["Thai".to_string()],
            menu_items: vec![MenuItem {
                name: "Pad Thai".to_string(),
                price_cents: 1200,
            }],
            delivery_price_cents: 250,
            estimated_delivery_minutes: 30,
            image_url: "https://example.com/thai.png".to_string(),
            last_updated: Utc::now(),
        };

        let json = serde_json::to_value(&restaurant).unwrap();
        assert!(json.get("lastUpdated").is_some());
        assert!(json.get("deliveryPriceCents").is_some());
        assert_eq!(json["menuItems"][0]["priceCents"], 1200);
    }
}
