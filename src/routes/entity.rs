//! Resource routes. Parameterized paths hand decoded segments to the handlers; anything
//! else falls through to `dispatch` so malformed and unknown paths still get JSON errors.

use crate::handlers::entity::{dispatch, dispatch_collection, dispatch_item};
use crate::state::AppState;
use axum::{routing::any, Router};

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/:resource", any(dispatch_collection))
        .route("/api/:resource/:id", any(dispatch_item))
        .fallback(dispatch)
        .with_state(state)
}
