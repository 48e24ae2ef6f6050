//! Router assembly.

mod common;
mod entity;

pub use common::{common_routes, ApiDoc};
pub use entity::entity_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Full application router: common routes plus the resource API, with request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(entity_routes(state))
        .layer(TraceLayer::new_for_http())
}
