//! Handlers for the `/food-listings` resource.
//!
//! Every write that changes rows invalidates the cached listing view.
//! Update and delete look listings up directly, never through the cache.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use foodshare_core::error::CoreError;
use foodshare_core::listing::{
    optional_text, require_text, validate_expiry, validate_listing_quantity,
    validate_reference_id, DEFAULT_MEAL_TYPE, DEFAULT_UNIT, FOOD_TYPES, MAX_FOOD_NAME_LENGTH,
    MAX_LABEL_LENGTH, MAX_LOCATION_LENGTH, MEAL_TYPES, PROVIDER_TYPES,
};
use foodshare_core::outcome::{MutationOutcome, MutationReport};
use foodshare_core::selection::{build_options, SelectionOption};
use foodshare_core::types::{Date, DbId};
use foodshare_db::models::food_listing::{
    CreateFoodListing, FoodListing, ListingWithProvider, UpdateFoodListing,
};
use foodshare_db::repositories::{FoodListingRepo, ProviderRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `DELETE /food-listings/{id}`.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub confirm: bool,
}

/// Result of an add, update or delete.
#[derive(Debug, Serialize)]
pub struct ListingChange {
    #[serde(flatten)]
    pub report: MutationReport,
    /// The stored row after the change, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing: Option<FoodListing>,
}

/// Fixed vocabularies offered by the listing form.
#[derive(Debug, Serialize)]
pub struct ListingVocabulary {
    pub provider_types: &'static [&'static str],
    pub food_types: &'static [&'static str],
    pub meal_types: &'static [&'static str],
    pub default_meal_type: &'static str,
    pub default_unit: &'static str,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check and normalize a new listing. Text fields come back trimmed.
pub fn validate_create(
    input: CreateFoodListing,
    today: Date,
) -> Result<CreateFoodListing, CoreError> {
    validate_reference_id("provider_id", input.provider_id)?;
    let food_name = require_text("food_name", &input.food_name, MAX_FOOD_NAME_LENGTH)?;
    let location = require_text("location", &input.location, MAX_LOCATION_LENGTH)?;
    let food_type = require_text("food_type", &input.food_type, MAX_LABEL_LENGTH)?;
    validate_listing_quantity(input.quantity)?;
    validate_expiry(input.expiry_date, today)?;

    Ok(CreateFoodListing {
        provider_id: input.provider_id,
        food_name,
        food_type,
        meal_type: optional_text("meal_type", input.meal_type.as_deref(), MAX_LABEL_LENGTH)?,
        quantity: input.quantity,
        unit: optional_text("unit", input.unit.as_deref(), MAX_LABEL_LENGTH)?,
        location,
        expiry_date: input.expiry_date,
        description: input
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        provider_type: optional_text(
            "provider_type",
            input.provider_type.as_deref(),
            MAX_LABEL_LENGTH,
        )?,
    })
}

/// Check and normalize an update. Text fields come back trimmed.
pub fn validate_update(input: UpdateFoodListing) -> Result<UpdateFoodListing, CoreError> {
    let food_name = require_text("food_name", &input.food_name, MAX_FOOD_NAME_LENGTH)?;
    let location = require_text("location", &input.location, MAX_LOCATION_LENGTH)?;
    let food_type = require_text("food_type", &input.food_type, MAX_LABEL_LENGTH)?;
    let meal_type = require_text("meal_type", &input.meal_type, MAX_LABEL_LENGTH)?;
    validate_listing_quantity(input.quantity)?;

    Ok(UpdateFoodListing {
        food_name,
        quantity: input.quantity,
        expiry_date: input.expiry_date,
        location,
        food_type,
        meal_type,
        unit: optional_text("unit", input.unit.as_deref(), MAX_LABEL_LENGTH)?,
        description: input
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
    })
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Food listing",
        id,
    })
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/food-listings
///
/// Served from the listing cache when it is warm.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ListingWithProvider>>>> {
    let listings = state
        .listing_cache
        .get_or_try_load(|| FoodListingRepo::list_available(&state.pool))
        .await?;
    Ok(Json(DataResponse {
        data: listings.as_ref().clone(),
    }))
}

/// GET /api/v1/food-listings/options
///
/// Id/label pairs for a select box, built from a fresh load.
pub async fn options(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SelectionOption>>>> {
    let listings = FoodListingRepo::list_available(&state.pool).await?;
    let options = build_options(
        listings
            .iter()
            .map(|l| (l.listing.id, l.listing.food_name.as_str())),
    );
    Ok(Json(DataResponse { data: options }))
}

/// GET /api/v1/food-listings/vocabulary
pub async fn vocabulary() -> Json<DataResponse<ListingVocabulary>> {
    Json(DataResponse {
        data: ListingVocabulary {
            provider_types: PROVIDER_TYPES,
            food_types: FOOD_TYPES,
            meal_types: MEAL_TYPES,
            default_meal_type: DEFAULT_MEAL_TYPE,
            default_unit: DEFAULT_UNIT,
        },
    })
}

/// GET /api/v1/food-listings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ListingWithProvider>>> {
    let listing = FoodListingRepo::find_available_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: listing }))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /api/v1/food-listings
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateFoodListing>,
) -> AppResult<(StatusCode, Json<DataResponse<ListingChange>>)> {
    let mut input = validate_create(input, Utc::now().date_naive())?;

    let provider = ProviderRepo::find_by_id(&state.pool, input.provider_id)
        .await?
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "provider_id {} does not match any provider",
                input.provider_id
            ))
        })?;
    if input.provider_type.is_none() {
        input.provider_type = Some(provider.provider_type);
    }

    let listing = FoodListingRepo::create(&state.pool, &input).await?;
    state.listing_cache.invalidate().await;

    let change = ListingChange {
        report: MutationReport::new(listing.id, MutationOutcome::Created),
        listing: Some(listing),
    };
    Ok((StatusCode::CREATED, Json(DataResponse { data: change })))
}

/// PUT /api/v1/food-listings/{id}
///
/// The id must name a currently available listing. Zero rows affected is
/// reported as `no_changes`, not as an error.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFoodListing>,
) -> AppResult<Json<DataResponse<ListingChange>>> {
    validate_reference_id("id", id)?;
    let input = validate_update(input)?;

    FoodListingRepo::find_available_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let rows = FoodListingRepo::update(&state.pool, id, &input).await?;
    let outcome = MutationOutcome::from_update(rows);

    let listing = if outcome.changed_rows() {
        state.listing_cache.invalidate().await;
        FoodListingRepo::find_by_id(&state.pool, id).await?
    } else {
        tracing::warn!(food_id = id, "Update matched no rows");
        None
    };

    Ok(Json(DataResponse {
        data: ListingChange {
            report: MutationReport::new(id, outcome),
            listing,
        },
    }))
}

/// DELETE /api/v1/food-listings/{id}?confirm=true
///
/// Without `confirm=true` nothing is sent to the database. Deleting a
/// listing that is already gone is reported as `already_absent`.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<DeleteParams>,
) -> AppResult<Json<DataResponse<ListingChange>>> {
    if !params.confirm {
        return Err(CoreError::Validation(format!(
            "Deleting food item #{id} requires confirm=true"
        ))
        .into());
    }
    validate_reference_id("id", id)?;

    let rows = FoodListingRepo::delete(&state.pool, id).await?;
    let outcome = MutationOutcome::from_delete(rows);
    if outcome.changed_rows() {
        state.listing_cache.invalidate().await;
    } else {
        tracing::warn!(food_id = id, "Delete matched no rows");
    }

    Ok(Json(DataResponse {
        data: ListingChange {
            report: MutationReport::new(id, outcome),
            listing: None,
        },
    }))
}
