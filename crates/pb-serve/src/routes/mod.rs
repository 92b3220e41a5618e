pub mod error;
pub mod postbacks;
pub mod probes;

use crate::middleware::correlation::correlation_middleware;
use crate::middleware::favicon::ignore_favicon;
use crate::AppState;
use axum::middleware;
use axum::Router;
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(probes::router(state.clone()))
        .merge(postbacks::router(state))
        .route_layer(middleware::from_fn(correlation_middleware))
        .layer(middleware::from_fn(ignore_favicon))
        .layer(TraceLayer::new_for_http())
}
