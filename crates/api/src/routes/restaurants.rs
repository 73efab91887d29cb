//! Restaurant lookup and city search endpoints.

use std::sync::Arc;

use auth::{IdentityResolver, TokenGate};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::RestaurantId;
use domain::{OrderService, PageEnvelope, SearchCriteria, SearchOutcome, SearchParams, SearchService};
use serde::Serialize;
use store::Restaurant;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S> {
    pub search: SearchService<S>,
    pub orders: OrderService<S>,
    pub identity: IdentityResolver<S>,
    pub gate: Arc<dyn TokenGate>,
    pub store: S,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub data: Vec<Restaurant>,
    pub pagination: Pagination,
}

#[derive(Serialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub pages: u32,
}

impl From<PageEnvelope> for SearchResponse {
    fn from(envelope: PageEnvelope) -> Self {
        Self {
            pagination: Pagination {
                total: envelope.total,
                page: envelope.page,
                pages: envelope.pages,
            },
            data: envelope.data,
        }
    }
}

/// GET /restaurants/:restaurantId — fetch a single restaurant.
///
/// A syntactically invalid id is indistinguishable from a missing one.
#[tracing::instrument(skip(state))]
pub async fn get<S: store::RestaurantStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(restaurant_id): Path<String>,
) -> Result<Json<Restaurant>, ApiError> {
    let id = uuid::Uuid::parse_str(&restaurant_id)
        .map(RestaurantId::from_uuid)
        .map_err(|_| ApiError::NotFound("restaurant not found".to_string()))?;

    let restaurant = state
        .store
        .get_restaurant(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("restaurant not found".to_string()))?;

    Ok(Json(restaurant))
}

/// GET /restaurants/:city/search — filtered, sorted, paged search.
///
/// A city with no restaurants at all responds 404 but still carries the
/// empty result envelope in the body.
#[tracing::instrument(skip(state, params))]
pub async fn search<S: store::RestaurantStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(city): Path<String>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let criteria = SearchCriteria::from_params(city, &params);

    match state.search.search(&criteria).await? {
        SearchOutcome::UnknownCity(envelope) => Ok((
            StatusCode::NOT_FOUND,
            Json(SearchResponse::from(envelope)),
        )
            .into_response()),
        SearchOutcome::Page(envelope) => {
            Ok(Json(SearchResponse::from(envelope)).into_response())
        }
    }
}
