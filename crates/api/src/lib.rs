//! HTTP API server for the restaurant platform.
//!
//! Public routes serve restaurant lookup and city search; order routes
//! sit behind the identity guard. Structured logging (tracing) and
//! Prometheus metrics are wired in at the router level.

pub mod config;
pub mod error;
pub mod guard;
pub mod routes;

use std::sync::Arc;

use auth::{IdentityResolver, TokenGate};
use axum::Router;
use axum::routing::{get, post};
use domain::{OrderService, SearchService};
use metrics_exporter_prometheus::PrometheusHandle;
use store::{OrderStore, RestaurantStore, UserStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::restaurants::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S>(state: Arc<AppState<S>>, metrics_handle: PrometheusHandle) -> Router
where
    S: RestaurantStore + OrderStore + UserStore + Clone + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    let guarded = Router::new()
        .route("/orders", get(routes::orders::list::<S>))
        .route(
            "/orders/checkout/create-checkout-session",
            post(routes::orders::create_checkout_session::<S>),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            guard::require_identity::<S>,
        ));

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/restaurants/{restaurant_id}",
            get(routes::restaurants::get::<S>),
        )
        .route(
            "/restaurants/{city}/search",
            get(routes::restaurants::search::<S>),
        )
        .route("/orders/checkout/webhook", post(routes::orders::webhook))
        .merge(guarded)
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Builds the shared application state around a single store handle.
pub fn create_state<S>(store: S, gate: Arc<dyn TokenGate>) -> Arc<AppState<S>>
where
    S: RestaurantStore + OrderStore + UserStore + Clone + 'static,
{
    Arc::new(AppState {
        search: SearchService::new(store.clone()),
        orders: OrderService::new(store.clone()),
        identity: IdentityResolver::new(store.clone()),
        gate,
        store,
    })
}
