//! Handlers for the `/receivers` resource.

use axum::extract::{Path, State};
use axum::Json;
use foodshare_core::error::CoreError;
use foodshare_core::types::DbId;
use foodshare_db::models::receiver::Receiver;
use foodshare_db::repositories::ReceiverRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/receivers
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Receiver>>>> {
    let receivers = ReceiverRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: receivers }))
}

/// GET /api/v1/receivers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Receiver>>> {
    let receiver = ReceiverRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Receiver",
            id,
        }))?;
    Ok(Json(DataResponse { data: receiver }))
}
