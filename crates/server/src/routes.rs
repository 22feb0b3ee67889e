//! Route configuration.

use crate::handlers;
use crate::origin::origin_guard;
use crate::state::AppState;
use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Create the application router.
///
/// The origin guard wraps only the `/save` routes; the health probe stays
/// reachable without an `Origin` header. Methods other than POST/OPTIONS on
/// `/save` get a 405 from axum's method routing.
pub fn create_router(state: AppState) -> Router {
    let save_routes = Router::new()
        .route(
            "/save",
            post(handlers::save_json).options(handlers::save_preflight),
        )
        .layer(middleware::from_fn_with_state(state.clone(), origin_guard));

    Router::new()
        .merge(save_routes)
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
