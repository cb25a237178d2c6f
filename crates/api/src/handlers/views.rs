//! Handlers for the generic `/views` tables.

use axum::extract::{Path, State};
use axum::Json;
use foodshare_core::table::QueryTable;
use foodshare_db::View;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/views
pub async fn list() -> Json<DataResponse<Vec<&'static str>>> {
    Json(DataResponse {
        data: View::ALL.iter().map(|v| v.slug()).collect(),
    })
}

/// GET /api/v1/views/{view}
pub async fn load(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<QueryTable>>> {
    let view: View = slug
        .parse()
        .map_err(|_| AppError::NotFound(format!("No view named '{slug}'")))?;
    let table = foodshare_db::load_view(&state.pool, view).await?;
    Ok(Json(DataResponse { data: table }))
}
