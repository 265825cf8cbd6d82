//! Axum router assembly.

use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use portal_app::ports::UserRepository;

use crate::api::USER_BASE_PATH;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the user API under `/user` and exposes `/health`.
/// [`render_errors`](crate::error::render_errors) turns every
/// [`ApiError`](crate::error::ApiError) into its JSON body, and a
/// [`TraceLayer`] logs each HTTP request/response at the `DEBUG` level.
pub fn build<R>(state: AppState<R>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest(USER_BASE_PATH, crate::api::routes())
        .layer(middleware::from_fn(crate::error::render_errors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
