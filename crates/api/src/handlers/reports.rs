//! Handlers for the report catalog.
//!
//! Report arguments arrive as query-string pairs; unknown keys are ignored
//! and missing ones fall back to the parameter's default.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::Json;
use foodshare_core::table::{export_file_name, QueryTable};
use foodshare_db::reports::{self, run_report, ReportDef, CATALOG};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// The rows of one report run.
#[derive(Debug, Serialize)]
pub struct ReportRun {
    pub slug: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub table: QueryTable,
}

/// Resolve a path segment to a report: its slug first, then its display label.
fn lookup(key: &str) -> AppResult<&'static ReportDef> {
    reports::find(key)
        .or_else(|| reports::find_by_label(key))
        .ok_or_else(|| AppError::NotFound(format!("No report named '{key}'")))
}

/// GET /api/v1/reports
pub async fn list() -> Json<DataResponse<&'static [ReportDef]>> {
    Json(DataResponse { data: CATALOG })
}

/// GET /api/v1/reports/{slug}
///
/// `slug` may also be the report's label, percent-encoded.
pub async fn run(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(args): Query<HashMap<String, String>>,
) -> AppResult<Json<DataResponse<ReportRun>>> {
    let report = lookup(&slug)?;
    let table = run_report(&state.pool, report, &args).await?;
    tracing::debug!(report = report.slug, rows = table.row_count(), "Report served");
    Ok(Json(DataResponse {
        data: ReportRun {
            slug: report.slug,
            label: report.label,
            table,
        },
    }))
}

/// GET /api/v1/reports/{slug}/export
///
/// The same rows as [`run`], as a CSV attachment named after the label.
pub async fn export(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(args): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let report = lookup(&slug)?;
    let table = run_report(&state.pool, report, &args).await?;
    let csv = table.to_csv()?;
    let file_name = export_file_name(report.label);

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        csv,
    ))
}
