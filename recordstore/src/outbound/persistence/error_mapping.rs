//! Shared `sqlx` error mapping for the executor adapters.

use tracing::debug;

use crate::domain::ports::SqlExecutorError;

/// Map a `sqlx` failure into the port's connection or query error.
///
/// Pool exhaustion, I/O and configuration problems are connection errors;
/// everything else happened while running the statement.
pub(super) fn map_sqlx_error(error: sqlx::Error) -> SqlExecutorError {
    match &error {
        sqlx::Error::Database(database) => {
            debug!(
                code = ?database.code(),
                message = database.message(),
                "sql statement failed"
            );
        }
        _ => debug!(%error, "sql executor failed"),
    }

    let message = error.to_string();
    match error {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Configuration(_) => SqlExecutorError::connection(message),
        _ => SqlExecutorError::query(message),
    }
}

/// Build the error reported when a cell has no text representation.
pub(super) fn undecodable_cell(column: &str, type_name: &str) -> SqlExecutorError {
    debug!(column, type_name, "unsupported cell type");
    SqlExecutorError::decode(column, format!("unsupported column type {type_name}"))
}
