//! Handlers for the `/claims` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use foodshare_core::error::CoreError;
use foodshare_core::listing::{validate_claimed_quantity, validate_reference_id};
use foodshare_core::status::ClaimStatus;
use foodshare_core::types::DbId;
use foodshare_db::models::claim::{Claim, ClaimDetail, CreateClaim, UpdateClaimStatus};
use foodshare_db::repositories::{ClaimRepo, FoodListingRepo, ReceiverRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/claims
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<ClaimDetail>>>> {
    let claims = ClaimRepo::list_detailed(&state.pool).await?;
    Ok(Json(DataResponse { data: claims }))
}

/// POST /api/v1/claims
///
/// The listing must be available and the receiver must exist. New claims
/// start as `Pending`.
pub async fn create(
    State(state): State<AppState>,
    Json(mut input): Json<CreateClaim>,
) -> AppResult<(StatusCode, Json<DataResponse<Claim>>)> {
    validate_reference_id("food_id", input.food_id)?;
    validate_reference_id("receiver_id", input.receiver_id)?;
    validate_claimed_quantity(input.claimed_quantity)?;
    input.notes = input
        .notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    if FoodListingRepo::find_available_by_id(&state.pool, input.food_id)
        .await?
        .is_none()
    {
        return Err(CoreError::Validation(format!(
            "food_id {} is not an available listing",
            input.food_id
        ))
        .into());
    }
    if ReceiverRepo::find_by_id(&state.pool, input.receiver_id)
        .await?
        .is_none()
    {
        return Err(CoreError::Validation(format!(
            "receiver_id {} does not match any receiver",
            input.receiver_id
        ))
        .into());
    }

    let claim = ClaimRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: claim })))
}

/// PATCH /api/v1/claims/{id}/status
///
/// Moves a claim along `Pending -> Approved -> Completed`, or to `Cancelled`
/// from either open state.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateClaimStatus>,
) -> AppResult<Json<DataResponse<Claim>>> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Claim",
            id,
        })
    };

    let claim = ClaimRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    let current: ClaimStatus = claim.status.parse()?;
    if !current.can_transition_to(input.status) {
        return Err(CoreError::Validation(format!(
            "Claim #{id} cannot move from {current} to {}",
            input.status
        ))
        .into());
    }

    let rows = ClaimRepo::update_status(&state.pool, id, current, input.status).await?;
    if rows == 0 {
        tracing::warn!(claim_id = id, %current, "Claim changed before status update");
        return Err(AppError::BadRequest(format!(
            "Claim #{id} is no longer {current}; reload and try again"
        )));
    }

    let claim = ClaimRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(DataResponse { data: claim }))
}
