//! Request guard: token verification and identity resolution.

use std::sync::Arc;

use auth::{AuthError, RequestIdentity, bearer_token};
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use store::{OrderStore, RestaurantStore, UserStore};

use crate::error::ApiError;
use crate::routes::restaurants::AppState;

/// Middleware protecting the order routes.
///
/// Verification always runs before resolution; on success the resolved
/// [`RequestIdentity`] is attached to the request extensions and stays
/// immutable for the rest of the request. Any failure is a bare 401.
pub async fn require_identity<S>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Response
where
    S: RestaurantStore + OrderStore + UserStore + Clone + 'static,
{
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    match authenticate(&state, header.as_deref()).await {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(AuthError::Unauthorized) => {
            metrics::counter!("auth_rejections_total").increment(1);
            ApiError::Unauthorized.into_response()
        }
    }
}

async fn authenticate<S>(
    state: &AppState<S>,
    header: Option<&str>,
) -> Result<RequestIdentity, AuthError>
where
    S: RestaurantStore + OrderStore + UserStore + Clone + 'static,
{
    let token = bearer_token(header)?;
    let verified = state.gate.verify(token)?;
    state.identity.resolve(&verified).await
}
