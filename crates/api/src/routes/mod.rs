pub mod claims;
pub mod food_listings;
pub mod health;
pub mod people;
pub mod reports;

use axum::routing::get;
use axum::Router;

use crate::handlers::{diagnostics, views};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /food-listings                       list (cached), create
/// /food-listings/options               id/label pairs from a fresh load
/// /food-listings/vocabulary            form vocabularies and defaults
/// /food-listings/{id}                  get, update, delete (?confirm=true)
///
/// /providers                           active providers
/// /providers/{id}                      get
/// /receivers                           active receivers
/// /receivers/{id}                      get
///
/// /claims                              list, create
/// /claims/{id}/status                  move along the lifecycle (PATCH)
///
/// /views                               view names
/// /views/{view}                        generic table for one view
///
/// /reports                             catalog
/// /reports/{slug}                      run (query-string arguments)
/// /reports/{slug}/export               CSV download
///
/// /diagnostics                         row counts and sample rows
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/food-listings", food_listings::router())
        .nest("/providers", people::provider_router())
        .nest("/receivers", people::receiver_router())
        .nest("/claims", claims::router())
        .nest("/reports", reports::router())
        .route("/views", get(views::list))
        .route("/views/{view}", get(views::load))
        .route("/diagnostics", get(diagnostics::show))
}
