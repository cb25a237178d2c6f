//! Repository for the `claims` table.

use sqlx::PgPool;
use foodshare_core::status::ClaimStatus;
use foodshare_core::types::DbId;

use crate::access::{run_statement, SqlParam};
use crate::error::DataResult;
use crate::models::claim::{Claim, ClaimDetail, CreateClaim};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, food_id, receiver_id, claimed_quantity, claimed_at, status, pickup_time, notes";

/// Provides create/read and status transitions for claims.
pub struct ClaimRepo;

impl ClaimRepo {
    /// Insert a new `Pending` claim, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateClaim) -> DataResult<Claim> {
        let query = format!(
            "INSERT INTO claims (food_id, receiver_id, claimed_quantity, status, pickup_time, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let claim = sqlx::query_as::<_, Claim>(&query)
            .bind(input.food_id)
            .bind(input.receiver_id)
            .bind(input.claimed_quantity)
            .bind(ClaimStatus::Pending.as_str())
            .bind(input.pickup_time)
            .bind(&input.notes)
            .fetch_one(pool)
            .await?;
        tracing::info!(claim_id = claim.id, food_id = claim.food_id, "Claim created");
        Ok(claim)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DataResult<Option<Claim>> {
        let query = format!("SELECT {COLUMNS} FROM claims WHERE id = $1");
        let claim = sqlx::query_as::<_, Claim>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(claim)
    }

    /// List claims with food and receiver names, newest first.
    pub async fn list_detailed(pool: &PgPool) -> DataResult<Vec<ClaimDetail>> {
        let claims = sqlx::query_as::<_, ClaimDetail>(
            "SELECT c.id, c.food_id, c.receiver_id, c.claimed_quantity, c.claimed_at,
                    c.status, c.pickup_time, c.notes,
                    fl.food_name, r.name AS receiver_name
             FROM claims c
             LEFT JOIN food_listings fl ON fl.id = c.food_id
             LEFT JOIN receivers r ON r.id = c.receiver_id
             ORDER BY c.claimed_at DESC, c.id DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(claims)
    }

    /// Move a claim from `from` to `to`. Returns rows affected, which is
    /// zero if the claim is gone or no longer in `from`.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        from: ClaimStatus,
        to: ClaimStatus,
    ) -> DataResult<u64> {
        let rows = run_statement(
            pool,
            "UPDATE claims SET status = $3 WHERE id = $1 AND status = $2",
            &[
                SqlParam::Int(id),
                SqlParam::from(from.as_str()),
                SqlParam::from(to.as_str()),
            ],
        )
        .await?;
        tracing::info!(claim_id = id, %from, %to, rows, "Claim status update executed");
        Ok(rows)
    }
}
