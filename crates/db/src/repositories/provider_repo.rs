//! Repository for the `providers` table.

use sqlx::PgPool;
use foodshare_core::types::DbId;

use crate::error::DataResult;
use crate::models::provider::Provider;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, provider_type, contact, email, phone, address, city, state, \
                       postal_code, registration_date, status";

/// Read access to providers. Registration happens outside this service.
pub struct ProviderRepo;

impl ProviderRepo {
    /// Find a provider by id, whatever its status.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DataResult<Option<Provider>> {
        let query = format!("SELECT {COLUMNS} FROM providers WHERE id = $1");
        let provider = sqlx::query_as::<_, Provider>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(provider)
    }

    /// List active providers ordered by name.
    pub async fn list_active(pool: &PgPool) -> DataResult<Vec<Provider>> {
        let query = format!(
            "SELECT {COLUMNS} FROM providers WHERE status = 'Active' ORDER BY name, id"
        );
        let providers = sqlx::query_as::<_, Provider>(&query).fetch_all(pool).await?;
        Ok(providers)
    }
}
