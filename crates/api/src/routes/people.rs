//! Route definitions for `/providers` and `/receivers`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{providers, receivers};
use crate::state::AppState;

/// Routes mounted at `/providers`.
pub fn provider_router() -> Router<AppState> {
    Router::new()
        .route("/", get(providers::list))
        .route("/{id}", get(providers::get_by_id))
}

/// Routes mounted at `/receivers`.
pub fn receiver_router() -> Router<AppState> {
    Router::new()
        .route("/", get(receivers::list))
        .route("/{id}", get(receivers::get_by_id))
}
