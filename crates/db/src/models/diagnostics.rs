//! Connection diagnostics payloads.

use serde::Serialize;
use foodshare_core::table::QueryTable;

/// Row count of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCount {
    pub table: String,
    pub row_count: i64,
}

/// A handful of rows from one table.
#[derive(Debug, Clone, Serialize)]
pub struct TableSample {
    pub table: String,
    pub sample: QueryTable,
}
