use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::claims;
use crate::state::AppState;

/// Routes mounted at `/claims`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// PATCH  /{id}/status    -> update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(claims::list).post(claims::create))
        .route("/{id}/status", patch(claims::update_status))
}
