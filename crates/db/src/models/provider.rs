//! Provider entity model.

use serde::Serialize;
use sqlx::FromRow;
use foodshare_core::types::{DbId, Timestamp};

/// A row from the `providers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Provider {
    pub id: DbId,
    pub name: String,
    pub provider_type: String,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub registration_date: Timestamp,
    pub status: String,
}
