//! Handlers for the `/providers` resource.

use axum::extract::{Path, State};
use axum::Json;
use foodshare_core::error::CoreError;
use foodshare_core::types::DbId;
use foodshare_db::models::provider::Provider;
use foodshare_db::repositories::ProviderRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/providers
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Provider>>>> {
    let providers = ProviderRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: providers }))
}

/// GET /api/v1/providers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Provider>>> {
    let provider = ProviderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Provider",
            id,
        }))?;
    Ok(Json(DataResponse { data: provider }))
}
