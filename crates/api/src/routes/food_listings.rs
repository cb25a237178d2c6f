//! Route definitions for the `/food-listings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::food_listings;
use crate::state::AppState;

/// Routes mounted at `/food-listings`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// GET    /options       -> options
/// GET    /vocabulary    -> vocabulary
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(food_listings::list).post(food_listings::create))
        .route("/options", get(food_listings::options))
        .route("/vocabulary", get(food_listings::vocabulary))
        .route(
            "/{id}",
            get(food_listings::get_by_id)
                .put(food_listings::update)
                .delete(food_listings::delete),
        )
}
