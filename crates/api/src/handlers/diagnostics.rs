//! Handlers for `/diagnostics`: what the connection can currently see.

use axum::extract::{Query, State};
use axum::Json;
use foodshare_db::models::diagnostics::{TableCount, TableSample};
use foodshare_db::repositories::diagnostics_repo::DEFAULT_SAMPLE_SIZE;
use foodshare_db::repositories::DiagnosticsRepo;
use foodshare_db::schema::TABLES;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /diagnostics`.
#[derive(Debug, Deserialize)]
pub struct DiagnosticsParams {
    /// Rows to sample per table (default: 5, capped at 100).
    pub sample: Option<i64>,
}

/// Row counts plus a few rows from every table.
#[derive(Debug, Serialize)]
pub struct DiagnosticsReport {
    pub counts: Vec<TableCount>,
    pub samples: Vec<TableSample>,
}

/// GET /api/v1/diagnostics
pub async fn show(
    State(state): State<AppState>,
    Query(params): Query<DiagnosticsParams>,
) -> AppResult<Json<DataResponse<DiagnosticsReport>>> {
    let limit = params.sample.unwrap_or(DEFAULT_SAMPLE_SIZE);
    let counts = DiagnosticsRepo::table_counts(&state.pool).await?;

    let mut samples = Vec::with_capacity(TABLES.len());
    for table in TABLES {
        samples.push(DiagnosticsRepo::sample_rows(&state.pool, table, limit).await?);
    }

    Ok(Json(DataResponse {
        data: DiagnosticsReport { counts, samples },
    }))
}
