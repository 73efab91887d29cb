use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    Result, StoreError,
    model::{Order, OrderStatus, Restaurant, User},
    query::{Clause, SearchFilter, SortField},
    store::{OrderStore, RestaurantStore, UserStore},
};
use common::{OrderId, RestaurantId, UserId};

const RESTAURANT_COLUMNS: &str = "id, name, city, country, cuisines, menu_items, \
     delivery_price_cents, estimated_delivery_minutes, image_url, last_updated";

const USER_COLUMNS: &str = "id, subject, email, name, address_line1, city, country";

const ORDER_COLUMNS: &str = "id, user_id, restaurant_id, status, cart, total_cents, created_at";

/// PostgreSQL-backed catalogue store.
///
/// Filter clauses are translated into `ILIKE` predicates; cuisine
/// containment tests run against the unnested `cuisines` array.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to the database and wraps the pool in a store.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Inserts a restaurant record (seeding and tests).
    pub async fn insert_restaurant(&self, restaurant: &Restaurant) -> Result<()> {
        let menu_items = serde_json::to_value(&restaurant.menu_items)?;

        sqlx::query(
            r#"
            INSERT INTO restaurants (id, name, city, country, cuisines, menu_items,
                delivery_price_cents, estimated_delivery_minutes, image_url, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(restaurant.id.as_uuid())
        .bind(&restaurant.name)
        .bind(&restaurant.city)
        .bind(&restaurant.country)
        .bind(&restaurant.cuisines)
        .bind(menu_items)
        .bind(restaurant.delivery_price_cents)
        .bind(restaurant.estimated_delivery_minutes)
        .bind(&restaurant.image_url)
        .bind(restaurant.last_updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts a user record (seeding and tests).
    pub async fn insert_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, subject, email, name, address_line1, city, country)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.subject)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.address_line1)
        .bind(&user.city)
        .bind(&user.country)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn row_to_restaurant(row: PgRow) -> Result<Restaurant> {
        let menu_items_json: serde_json::Value = row.try_get("menu_items")?;
        let menu_items = serde_json::from_value(menu_items_json)?;

        Ok(Restaurant {
            id: RestaurantId::from_uuid(row.try_get::<Uuid, _>("id")?),
            name: row.try_get("name")?,
            city: row.try_get("city")?,
            country: row.try_get("country")?,
            cuisines: row.try_get("cuisines")?,
            menu_items,
            delivery_price_cents: row.try_get("delivery_price_cents")?,
            estimated_delivery_minutes: row.try_get("estimated_delivery_minutes")?,
            image_url: row.try_get("image_url")?,
            last_updated: row.try_get("last_updated")?,
        })
    }

    fn row_to_user(row: PgRow) -> Result<User> {
        Ok(User {
            id: UserId::from_uuid(row.try_get::<Uuid, _>("id")?),
            subject: row.try_get("subject")?,
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            address_line1: row.try_get("address_line1")?,
            city: row.try_get("city")?,
            country: row.try_get("country")?,
        })
    }

    fn row_to_order(row: PgRow) -> Result<Order> {
        let status_name: String = row.try_get("status")?;
        let status = OrderStatus::parse(&status_name)
            .ok_or_else(|| StoreError::Decode(format!("unknown order status: {status_name}")))?;
        let cart_json: serde_json::Value = row.try_get("cart")?;
        let cart = serde_json::from_value(cart_json)?;

        Ok(Order {
            id: OrderId::from_uuid(row.try_get::<Uuid, _>("id")?),
            user_id: UserId::from_uuid(row.try_get::<Uuid, _>("user_id")?),
            restaurant_id: RestaurantId::from_uuid(row.try_get::<Uuid, _>("restaurant_id")?),
            status,
            cart,
            total_cents: row.try_get("total_cents")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Appends one `AND ...` predicate per clause, advancing the positional
/// parameter counter in the same order `filter_patterns` produces binds.
fn push_filter_sql(sql: &mut String, filter: &SearchFilter, param: &mut usize) {
    for clause in filter.clauses() {
        match clause {
            Clause::CityMatch(_) => {
                *param += 1;
                sql.push_str(&format!(" AND city ILIKE ${param}"));
            }
            Clause::CuisineAll(tokens) => {
                for _ in tokens {
                    *param += 1;
                    sql.push_str(&format!(
                        " AND EXISTS (SELECT 1 FROM unnest(cuisines) AS cuisine \
                         WHERE cuisine ILIKE ${param})"
                    ));
                }
            }
            Clause::TextOr(_) => {
                *param += 1;
                let name_param = *param;
                *param += 1;
                sql.push_str(&format!(
                    " AND (name ILIKE ${name_param} OR EXISTS \
                     (SELECT 1 FROM unnest(cuisines) AS cuisine WHERE cuisine ILIKE ${param}))"
                ));
            }
        }
    }
}

/// ILIKE patterns for the filter, in placeholder order. Patterns wrap the
/// raw user text unanchored on both sides.
fn filter_patterns(filter: &SearchFilter) -> Vec<String> {
    let mut patterns = Vec::new();
    for clause in filter.clauses() {
        match clause {
            Clause::CityMatch(city) => patterns.push(like_pattern(city)),
            Clause::CuisineAll(tokens) => {
                patterns.extend(tokens.iter().map(|t| like_pattern(t)));
            }
            Clause::TextOr(text) => {
                patterns.push(like_pattern(text));
                patterns.push(like_pattern(text));
            }
        }
    }
    patterns
}

fn like_pattern(text: &str) -> String {
    format!("%{text}%")
}

fn sort_column(sort: SortField) -> &'static str {
    match sort {
        SortField::LastUpdated => "last_updated",
        SortField::DeliveryPrice => "delivery_price_cents",
        SortField::EstimatedDeliveryTime => "estimated_delivery_minutes",
    }
}

#[async_trait]
impl RestaurantStore for PostgresStore {
    async fn get_restaurant(&self, id: RestaurantId) -> Result<Option<Restaurant>> {
        let row = sqlx::query(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_restaurant).transpose()
    }

    async fn count_restaurants(&self, filter: &SearchFilter) -> Result<u64> {
        let mut sql = String::from("SELECT COUNT(*) FROM restaurants WHERE 1=1");
        let mut param = 0;
        push_filter_sql(&mut sql, filter, &mut param);

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for pattern in filter_patterns(filter) {
            query = query.bind(pattern);
        }

        let count = query.fetch_one(&self.pool).await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn find_restaurants(
        &self,
        filter: &SearchFilter,
        sort: SortField,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Restaurant>> {
        let mut sql = format!("SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE 1=1");
        let mut param = 0;
        push_filter_sql(&mut sql, filter, &mut param);

        // Sort column comes from the SortField enum, never from user input.
        sql.push_str(&format!(" ORDER BY {} ASC, id ASC", sort_column(sort)));
        param += 1;
        sql.push_str(&format!(" LIMIT ${param}"));
        param += 1;
        sql.push_str(&format!(" OFFSET ${param}"));

        tracing::debug!(%sql, skip, limit, "executing restaurant search");

        let mut query = sqlx::query(&sql);
        for pattern in filter_patterns(filter) {
            query = query.bind(pattern);
        }
        query = query
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .bind(i64::try_from(skip).unwrap_or(i64::MAX));

        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_restaurant).collect()
    }
}

#[async_trait]
impl UserStore for PostgresStore {
    async fn find_user_by_subject(&self, subject: &str) -> Result<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE subject = $1"))
            .bind(subject)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_user).transpose()
    }
}

#[async_trait]
impl OrderStore for PostgresStore {
    async fn insert_order(&self, order: Order) -> Result<()> {
        let cart = serde_json::to_value(&order.cart)?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, user_id, restaurant_id, status, cart, total_cents, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.user_id.as_uuid())
        .bind(order.restaurant_id.as_uuid())
        .bind(order.status.as_str())
        .bind(cart)
        .bind(order.total_cents)
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>> {
        let rows = sqlx::query(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_order).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_sql_places_one_parameter_per_pattern() {
        let filter = SearchFilter::for_city("london")
            .with_cuisines(vec!["thai".to_string(), "vegan".to_string()])
            .with_text("noodles");

        let mut sql = String::new();
        let mut param = 0;
        push_filter_sql(&mut sql, &filter, &mut param);

        let patterns = filter_patterns(&filter);
        // city + two cuisine tokens + text twice (name OR cuisine)
        assert_eq!(param, 5);
        assert_eq!(patterns.len(), 5);
        assert_eq!(patterns[0], "%london%");
        assert_eq!(patterns[4], "%noodles%");
        assert!(sql.contains("city ILIKE $1"));
        assert!(sql.contains("cuisine ILIKE $2"));
        assert!(sql.contains("name ILIKE $4"));
        assert!(sql.contains("cuisine ILIKE $5"));
    }

    #[test]
    fn city_only_filter_emits_single_predicate() {
        let filter = SearchFilter::for_city("paris");
        let mut sql = String::new();
        let mut param = 0;
        push_filter_sql(&mut sql, &filter, &mut param);

        assert_eq!(sql, " AND city ILIKE $1");
        assert_eq!(filter_patterns(&filter), vec!["%paris%".to_string()]);
    }
}
