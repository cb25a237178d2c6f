//! Repository for the `food_listings` table.
//!
//! Mutations report rows affected rather than failing on zero; whether
//! zero is a no-op or a problem is the caller's call.

use sqlx::PgPool;
use foodshare_core::listing::{DEFAULT_MEAL_TYPE, DEFAULT_UNIT};
use foodshare_core::types::DbId;

use crate::access::{run_statement, SqlParam};
use crate::error::DataResult;
use crate::models::food_listing::{
    CreateFoodListing, FoodListing, ListingWithProvider, UpdateFoodListing,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, provider_id, provider_type, food_name, food_type, meal_type, \
                       quantity, unit, location, expiry_date, created_date, description, status";

/// Same columns qualified with the `fl` alias, for joins.
const JOINED_COLUMNS: &str = "fl.id, fl.provider_id, \
                              COALESCE(fl.provider_type, p.provider_type) AS provider_type, \
                              fl.food_name, fl.food_type, fl.meal_type, fl.quantity, fl.unit, \
                              fl.location, fl.expiry_date, fl.created_date, fl.description, \
                              fl.status, p.name AS provider_name";

/// Provides CRUD operations for food listings.
pub struct FoodListingRepo;

impl FoodListingRepo {
    /// Insert a new listing, returning the created row with its generated id.
    ///
    /// `meal_type` and `unit` fall back to their defaults when `None`.
    pub async fn create(pool: &PgPool, input: &CreateFoodListing) -> DataResult<FoodListing> {
        let query = format!(
            "INSERT INTO food_listings
                (provider_id, provider_type, food_name, food_type, meal_type, quantity, unit,
                 location, expiry_date, description)
             VALUES ($1, $2, $3, $4, COALESCE($5, '{DEFAULT_MEAL_TYPE}'), $6,
                     COALESCE($7, '{DEFAULT_UNIT}'), $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        let listing = sqlx::query_as::<_, FoodListing>(&query)
            .bind(input.provider_id)
            .bind(&input.provider_type)
            .bind(&input.food_name)
            .bind(&input.food_type)
            .bind(&input.meal_type)
            .bind(input.quantity)
            .bind(&input.unit)
            .bind(&input.location)
            .bind(input.expiry_date)
            .bind(&input.description)
            .fetch_one(pool)
            .await?;
        tracing::info!(food_id = listing.id, provider_id = listing.provider_id, "Food listing created");
        Ok(listing)
    }

    /// Find a listing by id, whatever its status.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DataResult<Option<FoodListing>> {
        let query = format!("SELECT {COLUMNS} FROM food_listings WHERE id = $1");
        let listing = sqlx::query_as::<_, FoodListing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(listing)
    }

    /// Find a listing by id among the currently available ones.
    pub async fn find_available_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> DataResult<Option<ListingWithProvider>> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM food_listings fl
             LEFT JOIN providers p ON p.id = fl.provider_id
             WHERE fl.id = $1 AND fl.status = 'Available'"
        );
        let listing = sqlx::query_as::<_, ListingWithProvider>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(listing)
    }

    /// List available listings with provider names, newest first.
    pub async fn list_available(pool: &PgPool) -> DataResult<Vec<ListingWithProvider>> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM food_listings fl
             LEFT JOIN providers p ON p.id = fl.provider_id
             WHERE fl.status = 'Available'
             ORDER BY fl.created_date DESC, fl.id DESC"
        );
        let listings = sqlx::query_as::<_, ListingWithProvider>(&query)
            .fetch_all(pool)
            .await?;
        Ok(listings)
    }

    /// Replace the editable fields of a listing. Returns rows affected.
    ///
    /// `unit` and `description` keep their stored value when `None`.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateFoodListing) -> DataResult<u64> {
        let params = [
            SqlParam::Int(id),
            SqlParam::from(input.food_name.as_str()),
            SqlParam::Float(input.quantity),
            SqlParam::Date(input.expiry_date),
            SqlParam::from(input.location.as_str()),
            SqlParam::from(input.food_type.as_str()),
            SqlParam::from(input.meal_type.as_str()),
            optional_text(input.unit.as_deref()),
            optional_text(input.description.as_deref()),
        ];
        let rows = run_statement(
            pool,
            "UPDATE food_listings SET
                food_name = $2,
                quantity = $3,
                expiry_date = $4,
                location = $5,
                food_type = $6,
                meal_type = $7,
                unit = COALESCE($8, unit),
                description = COALESCE($9, description)
             WHERE id = $1",
            &params,
        )
        .await?;
        tracing::info!(food_id = id, rows, "Food listing update executed");
        Ok(rows)
    }

    /// Permanently delete a listing. Returns rows affected.
    pub async fn delete(pool: &PgPool, id: DbId) -> DataResult<u64> {
        let rows = run_statement(
            pool,
            "DELETE FROM food_listings WHERE id = $1",
            &[SqlParam::Int(id)],
        )
        .await?;
        tracing::info!(food_id = id, rows, "Food listing delete executed");
        Ok(rows)
    }
}

fn optional_text(value: Option<&str>) -> SqlParam {
    value.map_or(SqlParam::Null, SqlParam::from)
}
