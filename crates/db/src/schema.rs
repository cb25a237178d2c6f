//! Idempotent schema DDL.
//!
//! Every statement uses `IF NOT EXISTS`, so [`ensure_schema`] can run on
//! every startup. Status `CHECK` lists are generated from the core status
//! enums so the two can never drift apart.

use foodshare_core::status::{sql_label_list, ClaimStatus, ListingStatus, RegistrationStatus};

use crate::error::DataResult;
use crate::DbPool;

/// Tables owned by this service, in dependency order.
pub const TABLES: &[&str] = &["providers", "receivers", "food_listings", "claims"];

/// Whether `name` is one of [`TABLES`]. Guards every place a table name is
/// interpolated into SQL.
pub fn is_known_table(name: &str) -> bool {
    TABLES.contains(&name)
}

fn labels<T: Copy>(all: &[T], as_str: fn(T) -> &'static str) -> String {
    let labels: Vec<&str> = all.iter().map(|s| as_str(*s)).collect();
    sql_label_list(&labels)
}

/// The full DDL, one statement per entry.
pub fn schema_statements() -> Vec<String> {
    let registration = labels(RegistrationStatus::ALL, RegistrationStatus::as_str);
    let listing = labels(ListingStatus::ALL, ListingStatus::as_str);
    let claim = labels(ClaimStatus::ALL, ClaimStatus::as_str);

    vec![
        format!(
            "CREATE TABLE IF NOT EXISTS providers (
                id BIGSERIAL PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                provider_type VARCHAR(50) NOT NULL,
                contact VARCHAR(255),
                email VARCHAR(255),
                phone VARCHAR(20),
                address TEXT,
                city VARCHAR(100) NOT NULL,
                state VARCHAR(100),
                postal_code VARCHAR(20),
                registration_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                status VARCHAR(20) NOT NULL DEFAULT 'Active'
                    CHECK (status IN ({registration}))
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS receivers (
                id BIGSERIAL PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                organization_type VARCHAR(50) NOT NULL,
                contact VARCHAR(255),
                email VARCHAR(255),
                phone VARCHAR(20),
                address TEXT,
                city VARCHAR(100) NOT NULL,
                state VARCHAR(100),
                postal_code VARCHAR(20),
                registration_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                status VARCHAR(20) NOT NULL DEFAULT 'Active'
                    CHECK (status IN ({registration}))
            )"
        ),
        // No foreign key on provider_id; the add flow checks it.
        format!(
            "CREATE TABLE IF NOT EXISTS food_listings (
                id BIGSERIAL PRIMARY KEY,
                provider_id BIGINT NOT NULL,
                provider_type VARCHAR(50),
                food_name VARCHAR(255) NOT NULL,
                food_type VARCHAR(50) NOT NULL,
                meal_type VARCHAR(50) NOT NULL DEFAULT 'Other',
                quantity DOUBLE PRECISION NOT NULL CHECK (quantity > 0),
                unit VARCHAR(20) NOT NULL DEFAULT 'kg',
                location VARCHAR(255) NOT NULL,
                expiry_date DATE NOT NULL,
                created_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                description TEXT,
                status VARCHAR(20) NOT NULL DEFAULT 'Available'
                    CHECK (status IN ({listing}))
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS claims (
                id BIGSERIAL PRIMARY KEY,
                food_id BIGINT NOT NULL,
                receiver_id BIGINT NOT NULL,
                claimed_quantity DOUBLE PRECISION NOT NULL CHECK (claimed_quantity > 0),
                claimed_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                status VARCHAR(20) NOT NULL DEFAULT 'Pending'
                    CHECK (status IN ({claim})),
                pickup_time TIMESTAMPTZ,
                notes TEXT
            )"
        ),
        "CREATE INDEX IF NOT EXISTS idx_providers_city ON providers (city)".into(),
        "CREATE INDEX IF NOT EXISTS idx_receivers_city ON receivers (city)".into(),
        "CREATE INDEX IF NOT EXISTS idx_food_listings_location ON food_listings (location)".into(),
        "CREATE INDEX IF NOT EXISTS idx_food_listings_expiry ON food_listings (expiry_date)".into(),
        "CREATE INDEX IF NOT EXISTS idx_food_listings_status ON food_listings (status)".into(),
        "CREATE INDEX IF NOT EXISTS idx_claims_status ON claims (status)".into(),
        "CREATE INDEX IF NOT EXISTS idx_claims_claimed_at ON claims (claimed_at)".into(),
    ]
}

/// Create any missing tables and indexes. Existing objects are left alone.
pub async fn ensure_schema(pool: &DbPool) -> DataResult<()> {
    let statements = schema_statements();
    for statement in &statements {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::info!(statements = statements.len(), "Schema ensured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_statement_is_idempotent() {
        for statement in schema_statements() {
            assert!(
                statement.contains("IF NOT EXISTS"),
                "not idempotent: {statement}"
            );
        }
    }

    #[test]
    fn check_constraints_list_every_status() {
        let ddl = schema_statements().join("\n");
        for status in ClaimStatus::ALL {
            assert!(ddl.contains(&format!("'{status}'")));
        }
        assert!(ddl.contains("'Available', 'Claimed', 'Expired'"));
    }

    #[test]
    fn every_table_is_created() {
        let ddl = schema_statements().join("\n");
        for table in TABLES {
            assert!(ddl.contains(&format!("CREATE TABLE IF NOT EXISTS {table} (")));
        }
    }

    #[test]
    fn unknown_tables_are_rejected() {
        assert!(is_known_table("claims"));
        assert!(!is_known_table("pg_shadow"));
        assert!(!is_known_table("claims; DROP TABLE claims"));
    }
}
