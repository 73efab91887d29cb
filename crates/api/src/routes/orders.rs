//! Order endpoints: listing, checkout, and the payment webhook.

use std::sync::Arc;

use auth::RequestIdentity;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::Json;
use domain::CheckoutCart;
use store::{Order, OrderStore, RestaurantStore};

use crate::error::ApiError;
use crate::routes::restaurants::AppState;

/// GET /orders — the authenticated user's orders, newest first.
#[tracing::instrument(skip(state, identity), fields(user_id = %identity.user_id))]
pub async fn list<S: RestaurantStore + OrderStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(identity): Extension<RequestIdentity>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state.orders.orders_for(identity.user_id).await?;
    Ok(Json(orders))
}

/// POST /orders/checkout/create-checkout-session — price the cart and
/// record the order as placed.
#[tracing::instrument(skip(state, identity, cart), fields(user_id = %identity.user_id))]
pub async fn create_checkout_session<S: RestaurantStore + OrderStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(identity): Extension<RequestIdentity>,
    Json(cart): Json<CheckoutCart>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = state.orders.checkout(identity.user_id, cart).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// POST /orders/checkout/webhook — payment provider callback.
///
/// Deliberately unauthenticated; the provider retries on anything but
/// a 2xx, so the handler acknowledges and nothing more.
#[tracing::instrument]
pub async fn webhook() -> StatusCode {
    StatusCode::OK
}
