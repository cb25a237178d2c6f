//! Repository for the `receivers` table.

use sqlx::PgPool;
use foodshare_core::types::DbId;

use crate::error::DataResult;
use crate::models::receiver::Receiver;

const COLUMNS: &str = "id, name, organization_type, contact, email, phone, address, city, \
                       state, postal_code, registration_date, status";

pub struct ReceiverRepo;

impl ReceiverRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DataResult<Option<Receiver>> {
        let query = format!("SELECT {COLUMNS} FROM receivers WHERE id = $1");
        let receiver = sqlx::query_as::<_, Receiver>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(receiver)
    }

    /// List active receivers ordered by name.
    pub async fn list_active(pool: &PgPool) -> DataResult<Vec<Receiver>> {
        let query = format!(
            "SELECT {COLUMNS} FROM receivers WHERE status = 'Active' ORDER BY name, id"
        );
        let receivers = sqlx::query_as::<_, Receiver>(&query).fetch_all(pool).await?;
        Ok(receivers)
    }
}
