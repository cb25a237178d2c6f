//! HTTP tests for food listings and claims.
//!
//! Validation tests run against an unreachable database: a 400 proves the
//! request was rejected before any query was attempted.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, build_offline_app, build_test_app, delete, get, patch_json, post_json, put_json};
use serde_json::{json, Value};
use sqlx::PgPool;

fn in_days(days: i64) -> String {
    (Utc::now().date_naive() + Duration::days(days)).to_string()
}

fn listing_body(provider_id: i64) -> Value {
    json!({
        "provider_id": provider_id,
        "food_name": "  Tomato Soup ",
        "food_type": "Vegetarian",
        "quantity": 6.0,
        "location": "New Jessica",
        "expiry_date": in_days(3),
    })
}

fn update_body(name: &str) -> Value {
    json!({
        "food_name": name,
        "quantity": 3.0,
        "expiry_date": in_days(5),
        "location": "Springfield",
        "food_type": "Vegan",
        "meal_type": "Dinner",
    })
}

// ---------------------------------------------------------------------------
// Validation happens before the database
// ---------------------------------------------------------------------------

#[tokio::test]
async fn blank_location_is_rejected_without_database() {
    let mut body = listing_body(1);
    body["location"] = json!("   ");

    let response = post_json(build_offline_app(), "/api/v1/food-listings", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "location is required");
}

#[tokio::test]
async fn quantity_below_one_is_rejected_without_database() {
    let mut body = listing_body(1);
    body["quantity"] = json!(0);

    let response = post_json(build_offline_app(), "/api/v1/food-listings", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn past_expiry_is_rejected_without_database() {
    let mut body = listing_body(1);
    body["expiry_date"] = json!(in_days(-1));

    let response = post_json(build_offline_app(), "/api/v1/food-listings", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"]
        .as_str()
        .unwrap()
        .contains("expiry_date"));
}

#[tokio::test]
async fn delete_without_confirmation_is_rejected_without_database() {
    let response = delete(build_offline_app(), "/api/v1/food-listings/4").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = delete(build_offline_app(), "/api/v1/food-listings/4?confirm=false").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_with_blank_name_is_rejected_without_database() {
    let response = put_json(build_offline_app(), "/api/v1/food-listings/1", update_body(" ")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_positive_claim_quantity_is_rejected_without_database() {
    let body = json!({ "food_id": 1, "receiver_id": 1, "claimed_quantity": 0 });
    let response = post_json(build_offline_app(), "/api/v1/claims", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn vocabulary_needs_no_database() {
    let response = get(build_offline_app(), "/api/v1/food-listings/vocabulary").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["default_unit"], "kg");
    assert_eq!(json["data"]["default_meal_type"], "Other");
}

// ---------------------------------------------------------------------------
// Unreachable database
// ---------------------------------------------------------------------------

#[tokio::test]
async fn listing_read_reports_unavailable_database() {
    let response = get(build_offline_app(), "/api/v1/food-listings").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_json(response).await;
    assert_eq!(json["code"], "DATABASE_UNAVAILABLE");
}

#[tokio::test]
async fn confirmed_delete_reports_unavailable_database() {
    let response = delete(build_offline_app(), "/api/v1/food-listings/4?confirm=true").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// ---------------------------------------------------------------------------
// Against a database
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn add_update_delete_round_trip(pool: PgPool) {
    common::seed(&pool).await;
    let app = build_test_app(pool.clone());

    let before = body_json(get(app.clone(), "/api/v1/food-listings").await).await;
    let before_len = before["data"].as_array().unwrap().len();

    // Add.
    let response = post_json(app.clone(), "/api/v1/food-listings", listing_body(1)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["outcome"], "created");
    assert_eq!(created["data"]["listing"]["food_name"], "Tomato Soup");
    assert_eq!(created["data"]["listing"]["unit"], "kg");

    // The cached list must see the new row.
    let after = body_json(get(app.clone(), "/api/v1/food-listings").await).await;
    assert_eq!(after["data"].as_array().unwrap().len(), before_len + 1);

    // Update.
    let response = put_json(
        app.clone(),
        &format!("/api/v1/food-listings/{id}"),
        update_body("Minestrone"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["outcome"], "updated");
    assert_eq!(updated["data"]["warning"], false);
    assert_eq!(updated["data"]["listing"]["food_name"], "Minestrone");
    assert_eq!(updated["data"]["listing"]["location"], "Springfield");

    // Delete.
    let uri = format!("/api/v1/food-listings/{id}?confirm=true");
    let deleted = body_json(delete(app.clone(), &uri).await).await;
    assert_eq!(deleted["data"]["outcome"], "deleted");
    assert_eq!(deleted["data"]["message"], format!("Food item #{id} deleted successfully"));

    // Deleting again is benign.
    let response = delete(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let again = body_json(response).await;
    assert_eq!(again["data"]["outcome"], "already_absent");
    assert_eq!(again["data"]["warning"], true);

    let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM food_listings WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn add_with_unknown_provider_is_rejected(pool: PgPool) {
    common::seed(&pool).await;
    let app = build_test_app(pool);

    let response = post_json(app, "/api/v1/food-listings", listing_body(9_999)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"]
        .as_str()
        .unwrap()
        .contains("provider_id"));
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn update_of_missing_listing_is_not_found(pool: PgPool) {
    common::seed(&pool).await;
    let app = build_test_app(pool);

    let response = put_json(app, "/api/v1/food-listings/9999", update_body("Ghost")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn options_pair_ids_with_labels(pool: PgPool) {
    common::seed(&pool).await;
    let app = build_test_app(pool);

    let json = body_json(get(app, "/api/v1/food-listings/options").await).await;
    let options = json["data"].as_array().unwrap();
    assert_eq!(options.len(), 5);
    for option in options {
        let id = option["id"].as_i64().unwrap();
        assert!(option["label"].as_str().unwrap().starts_with(&format!("#{id} ")));
    }
}

#[sqlx::test(migrations = false)]
#[ignore = "requires database"]
async fn claim_lifecycle(pool: PgPool) {
    common::seed(&pool).await;
    let app = build_test_app(pool);

    let options = body_json(get(app.clone(), "/api/v1/food-listings/options").await).await;
    let food_id = options["data"][0]["id"].as_i64().unwrap();
    let receivers = body_json(get(app.clone(), "/api/v1/receivers").await).await;
    let receiver_id = receivers["data"][0]["id"].as_i64().unwrap();

    let response = post_json(
        app.clone(),
        "/api/v1/claims",
        json!({ "food_id": food_id, "receiver_id": receiver_id, "claimed_quantity": 1.5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let claim = body_json(response).await;
    let claim_id = claim["data"]["id"].as_i64().unwrap();
    assert_eq!(claim["data"]["status"], "Pending");

    let uri = format!("/api/v1/claims/{claim_id}/status");
    let skipped = patch_json(app.clone(), &uri, json!({ "status": "Completed" })).await;
    assert_eq!(skipped.status(), StatusCode::BAD_REQUEST);

    let approved = patch_json(app.clone(), &uri, json!({ "status": "Approved" })).await;
    assert_eq!(approved.status(), StatusCode::OK);
    assert_eq!(body_json(approved).await["data"]["status"], "Approved");

    let cancelled = patch_json(app.clone(), &uri, json!({ "status": "Cancelled" })).await;
    assert_eq!(body_json(cancelled).await["data"]["status"], "Cancelled");

    // Cancelled claims drop out of the claims view.
    let view = body_json(get(app, "/api/v1/views/claims").await).await;
    let ids: Vec<i64> = view["data"]["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row[0].as_i64().unwrap())
        .collect();
    assert!(!ids.contains(&claim_id));
}
