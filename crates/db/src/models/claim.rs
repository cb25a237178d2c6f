//! Claim entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use foodshare_core::status::ClaimStatus;
use foodshare_core::types::{DbId, Timestamp};

/// A row from the `claims` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Claim {
    pub id: DbId,
    pub food_id: DbId,
    pub receiver_id: DbId,
    pub claimed_quantity: f64,
    pub claimed_at: Timestamp,
    pub status: String,
    pub pickup_time: Option<Timestamp>,
    pub notes: Option<String>,
}

/// A claim joined with the names of what was claimed and by whom.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClaimDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub claim: Claim,
    pub food_name: Option<String>,
    pub receiver_name: Option<String>,
}

/// DTO for creating a claim. New claims start as `Pending`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClaim {
    pub food_id: DbId,
    pub receiver_id: DbId,
    pub claimed_quantity: f64,
    pub pickup_time: Option<Timestamp>,
    pub notes: Option<String>,
}

/// DTO for moving a claim along its lifecycle.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateClaimStatus {
    pub status: ClaimStatus,
}
