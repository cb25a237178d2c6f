use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET    /                 -> list
/// GET    /{slug}           -> run
/// GET    /{slug}/export    -> export
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reports::list))
        .route("/{slug}", get(reports::run))
        .route("/{slug}/export", get(reports::export))
}
