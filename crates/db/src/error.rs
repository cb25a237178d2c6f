//! Failure taxonomy for database calls.

/// Why a database call did not produce data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    /// The statement ran but the requested row does not exist.
    #[error("Record not found")]
    NotFound,

    /// The database could not be reached or refused the session.
    #[error("Database connection error: {0}")]
    Connection(String),

    /// The statement itself failed (constraint, syntax, type mismatch).
    #[error("Statement failed: {0}")]
    Statement(String),
}

/// Convenience alias for data-access return values.
pub type DataResult<T> = Result<T, DataError>;

/// SQLSTATE classes that mean the session itself is unusable:
/// `08` connection exception, `28` invalid authorization, `3D` invalid
/// catalog (unknown database), `57P` operator intervention.
const CONNECTION_SQLSTATE_PREFIXES: &[&str] = &["08", "28", "3D", "57P"];

impl From<sqlx::Error> for DataError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DataError::NotFound,
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => DataError::Connection(err.to_string()),
            sqlx::Error::Database(ref db_err) => {
                let is_connection = db_err.code().is_some_and(|code| {
                    CONNECTION_SQLSTATE_PREFIXES
                        .iter()
                        .any(|prefix| code.starts_with(prefix))
                });
                if is_connection {
                    DataError::Connection(err.to_string())
                } else {
                    DataError::Statement(err.to_string())
                }
            }
            other => DataError::Statement(other.to_string()),
        }
    }
}

impl DataError {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            DataError::NotFound => "NOT_FOUND",
            DataError::Connection(_) => "DATABASE_UNAVAILABLE",
            DataError::Statement(_) => "STATEMENT_ERROR",
        }
    }
}
