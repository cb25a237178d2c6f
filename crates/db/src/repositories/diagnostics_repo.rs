//! Raw-connection diagnostics: row counts and sample rows per table.

use sqlx::PgPool;

use crate::access::{run_query, SqlParam};
use crate::error::{DataError, DataResult};
use crate::models::diagnostics::{TableCount, TableSample};
use crate::schema::{is_known_table, TABLES};

/// Default number of rows returned by [`DiagnosticsRepo::sample_rows`].
pub const DEFAULT_SAMPLE_SIZE: i64 = 5;

/// Largest sample a caller may request.
pub const MAX_SAMPLE_SIZE: i64 = 100;

pub struct DiagnosticsRepo;

impl DiagnosticsRepo {
    /// Row count of every service table, in dependency order.
    pub async fn table_counts(pool: &PgPool) -> DataResult<Vec<TableCount>> {
        let mut counts = Vec::with_capacity(TABLES.len());
        for table in TABLES {
            let (row_count,): (i64,) =
                sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
                    .fetch_one(pool)
                    .await?;
            counts.push(TableCount {
                table: table.to_string(),
                row_count,
            });
        }
        Ok(counts)
    }

    /// The first `limit` rows of `table` by id.
    ///
    /// Only tables created by this service may be sampled.
    pub async fn sample_rows(pool: &PgPool, table: &str, limit: i64) -> DataResult<TableSample> {
        if !is_known_table(table) {
            return Err(DataError::Statement(format!("Unknown table: '{table}'")));
        }
        let limit = limit.clamp(1, MAX_SAMPLE_SIZE);
        let sample = run_query(
            pool,
            &format!("SELECT * FROM {table} ORDER BY id LIMIT $1"),
            &[SqlParam::Int(limit)],
        )
        .await?;
        Ok(TableSample {
            table: table.to_string(),
            sample,
        })
    }
}
