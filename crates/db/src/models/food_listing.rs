//! Food listing entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use foodshare_core::types::{Date, DbId, Timestamp};

/// A row from the `food_listings` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct FoodListing {
    pub id: DbId,
    pub provider_id: DbId,
    pub provider_type: Option<String>,
    pub food_name: String,
    pub food_type: String,
    pub meal_type: String,
    pub quantity: f64,
    pub unit: String,
    pub location: String,
    pub expiry_date: Date,
    pub created_date: Timestamp,
    pub description: Option<String>,
    pub status: String,
}

/// A listing joined with its provider's name.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ListingWithProvider {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub listing: FoodListing,
    pub provider_name: Option<String>,
}

/// DTO for creating a new listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFoodListing {
    pub provider_id: DbId,
    pub food_name: String,
    pub food_type: String,
    /// Defaults to `Other` if omitted.
    pub meal_type: Option<String>,
    pub quantity: f64,
    /// Defaults to `kg` if omitted.
    pub unit: Option<String>,
    pub location: String,
    pub expiry_date: Date,
    pub description: Option<String>,
    /// Copied from the provider if omitted.
    pub provider_type: Option<String>,
}

/// DTO for replacing the editable fields of a listing.
///
/// `unit` and `description` keep their stored value when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFoodListing {
    pub food_name: String,
    pub quantity: f64,
    pub expiry_date: Date,
    pub location: String,
    pub food_type: String,
    pub meal_type: String,
    pub unit: Option<String>,
    pub description: Option<String>,
}
