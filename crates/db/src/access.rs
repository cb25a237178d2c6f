//! Untyped query execution: bound parameters in, named-column tables out.
//!
//! Used by the report catalog, the pre-defined views and diagnostics. Typed
//! repositories go through `sqlx::query_as` directly.

use foodshare_core::table::QueryTable;
use foodshare_core::types::{Date, Timestamp};
use serde::Serialize;
use serde_json::Value;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Column, Executor, Postgres, Row, TypeInfo};

use crate::error::{DataError, DataResult};
use crate::DbPool;

/// A value bound to a `$n` placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlParam {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Date(Date),
    Timestamp(Timestamp),
    /// A `NULL` of type `text`.
    Null,
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(value)
    }
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::Int(value)
    }
}

impl From<f64> for SqlParam {
    fn from(value: f64) -> Self {
        SqlParam::Float(value)
    }
}

/// Execute a read query and return every row as a [`QueryTable`].
///
/// Column names are preserved even when the query returns no rows.
pub async fn run_query(pool: &DbPool, sql: &str, params: &[SqlParam]) -> DataResult<QueryTable> {
    let mut conn = acquire(pool).await?;

    let rows = bind_params(sqlx::query(sql), params)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| statement_failed(sql, e))?;

    let table = if rows.is_empty() {
        let described = (&mut *conn)
            .describe(sql)
            .await
            .map_err(|e| statement_failed(sql, e))?;
        QueryTable::new(
            described
                .columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect(),
        )
    } else {
        rows_to_table(&rows)?
    };

    tracing::debug!(rows = table.row_count(), columns = table.columns.len(), "Query completed");
    Ok(table)
}

/// Execute one INSERT/UPDATE/DELETE and return the number of rows affected.
///
/// Zero rows is returned as `Ok(0)`; the caller decides what it means.
pub async fn run_statement(pool: &DbPool, sql: &str, params: &[SqlParam]) -> DataResult<u64> {
    let mut conn = acquire(pool).await?;

    let result = bind_params(sqlx::query(sql), params)
        .execute(&mut *conn)
        .await
        .map_err(|e| statement_failed(sql, e))?;

    let rows_affected = result.rows_affected();
    tracing::debug!(rows_affected, "Statement completed");
    Ok(rows_affected)
}

async fn acquire(pool: &DbPool) -> DataResult<PoolConnection<Postgres>> {
    pool.acquire().await.map_err(|e| {
        let err = DataError::from(e);
        tracing::error!(error = %err, "Could not acquire database connection");
        err
    })
}

fn statement_failed(sql: &str, err: sqlx::Error) -> DataError {
    let err = DataError::from(err);
    tracing::error!(error = %err, sql, "Database call failed");
    err
}

fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [SqlParam],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            SqlParam::Int(v) => query.bind(*v),
            SqlParam::Float(v) => query.bind(*v),
            SqlParam::Text(v) => query.bind(v.as_str()),
            SqlParam::Bool(v) => query.bind(*v),
            SqlParam::Date(v) => query.bind(*v),
            SqlParam::Timestamp(v) => query.bind(*v),
            SqlParam::Null => query.bind(None::<String>),
        };
    }
    query
}

fn rows_to_table(rows: &[PgRow]) -> DataResult<QueryTable> {
    let columns: Vec<String> = rows[0]
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    let width = columns.len();
    let mut table = QueryTable::new(columns);

    for row in rows {
        let cells = (0..width)
            .map(|idx| decode_cell(row, idx))
            .collect::<DataResult<Vec<Value>>>()?;
        table
            .push_row(cells)
            .map_err(|e| DataError::Statement(e.to_string()))?;
    }
    Ok(table)
}

/// Decode one cell by its PostgreSQL type.
///
/// Aggregates that produce `NUMERIC` must be cast to `float8` in SQL;
/// unsupported types fail with the column name rather than silently
/// becoming `NULL`.
fn decode_cell(row: &PgRow, idx: usize) -> DataResult<Value> {
    let column = &row.columns()[idx];
    let value = match column.type_info().name() {
        "INT2" => nullable(row.try_get::<Option<i16>, _>(idx)?),
        "INT4" => nullable(row.try_get::<Option<i32>, _>(idx)?),
        "INT8" => nullable(row.try_get::<Option<i64>, _>(idx)?),
        "FLOAT4" => nullable(row.try_get::<Option<f32>, _>(idx)?),
        "FLOAT8" => nullable(row.try_get::<Option<f64>, _>(idx)?),
        "BOOL" => nullable(row.try_get::<Option<bool>, _>(idx)?),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => nullable(row.try_get::<Option<String>, _>(idx)?),
        "DATE" => nullable(row.try_get::<Option<Date>, _>(idx)?.map(|d| d.to_string())),
        "TIMESTAMPTZ" => nullable(row.try_get::<Option<Timestamp>, _>(idx)?.map(|t| t.to_rfc3339())),
        "TIMESTAMP" => nullable(
            row.try_get::<Option<chrono::NaiveDateTime>, _>(idx)?
                .map(|t| t.to_string()),
        ),
        other => {
            return Err(DataError::Statement(format!(
                "column '{}' has unsupported type {other}; cast it to float8, int8 or text",
                column.name()
            )))
        }
    };
    Ok(value)
}

fn nullable<T: Into<Value>>(value: Option<T>) -> Value {
    value.map_or(Value::Null, Into::into)
}
