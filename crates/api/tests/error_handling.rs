//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests call `IntoResponse` directly on `AppError` values and need
//! neither a server nor a database.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use foodshare_api::error::AppError;
use foodshare_core::error::CoreError;
use foodshare_db::reports::{self, ReportFailure};
use foodshare_db::DataError;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Food listing",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Food listing with id 42 not found");
}

#[tokio::test]
async fn validation_error_returns_400_with_field_message() {
    let err = AppError::Core(CoreError::Validation("food_name is required".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "food_name is required");
}

#[tokio::test]
async fn connection_error_returns_503() {
    let err = AppError::Data(DataError::Connection("connection refused".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "DATABASE_UNAVAILABLE");
    assert!(json["error"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn statement_error_returns_500_with_detail() {
    let err = AppError::Data(DataError::Statement("division by zero".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "STATEMENT_ERROR");
    assert!(json["error"].as_str().unwrap().contains("division by zero"));
}

#[tokio::test]
async fn report_failure_includes_raw_query() {
    let report = reports::find("claim-status-percentage").unwrap();
    let err = AppError::Report(ReportFailure {
        slug: report.slug,
        label: report.label,
        query: report.sql,
        error: DataError::Statement("relation \"claims\" does not exist".into()),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "STATEMENT_ERROR");
    assert_eq!(json["report"], "claim-status-percentage");
    assert_eq!(json["query"], report.sql);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Report 'Percentage of food claims by status' failed"));
}

#[tokio::test]
async fn internal_error_hides_detail() {
    let err = AppError::Core(CoreError::Internal("pool poisoned".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}
