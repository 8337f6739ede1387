//! SQLite-backed `SqlExecutor` implementation.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::sqlite::{SqliteColumn, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column as _, Row as _, Sqlite, TypeInfo as _, ValueRef as _};

use crate::domain::TIMESTAMP_FORMAT;
use crate::domain::ports::{Row, SqlExecutor, SqlExecutorError, Statement};

use super::error_mapping::{map_sqlx_error, undecodable_cell};

/// Executor over a single-connection SQLite pool.
///
/// One connection keeps `sqlite::memory:` databases alive for the lifetime of
/// the executor and serialises writes the way SQLite expects.
#[derive(Debug, Clone)]
pub struct SqliteSqlExecutor {
    pool: SqlitePool,
}

impl SqliteSqlExecutor {
    /// Open `url`, creating the database file when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SqlExecutorError::Connection`] when the URL is malformed or
    /// the database cannot be opened.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn demo() -> Result<(), recordstore::domain::ports::SqlExecutorError> {
    /// use recordstore::outbound::persistence::SqliteSqlExecutor;
    ///
    /// let executor = SqliteSqlExecutor::connect("sqlite::memory:").await?;
    /// # drop(executor);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self, SqlExecutorError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl SqlExecutor for SqliteSqlExecutor {
    async fn execute(&self, statement: &Statement) -> Result<u64, SqlExecutorError> {
        let query = statement
            .params
            .iter()
            .fold(sqlx::query::<Sqlite>(&statement.sql), |query, param| {
                query.bind(param.as_str())
            });
        let result = query.execute(&self.pool).await.map_err(map_sqlx_error)?;
        Ok(result.rows_affected())
    }

    async fn select_rows(&self, statement: &Statement) -> Result<Vec<Row>, SqlExecutorError> {
        let query = statement
            .params
            .iter()
            .fold(sqlx::query::<Sqlite>(&statement.sql), |query, param| {
                query.bind(param.as_str())
            });
        let rows = query.fetch_all(&self.pool).await.map_err(map_sqlx_error)?;
        rows.iter().map(decode_row).collect()
    }
}

fn decode_row(row: &SqliteRow) -> Result<Row, SqlExecutorError> {
    row.columns()
        .iter()
        .map(|column| Ok((column.name().to_owned(), decode_cell(row, column)?)))
        .collect()
}

/// SQLite is dynamically typed, so each storage class is tried in turn.
fn decode_cell(row: &SqliteRow, column: &SqliteColumn) -> Result<String, SqlExecutorError> {
    let ordinal = column.ordinal();
    let raw = row.try_get_raw(ordinal).map_err(map_sqlx_error)?;
    if raw.is_null() {
        return Ok(String::new());
    }
    if let Ok(text) = row.try_get::<String, _>(ordinal) {
        return Ok(text);
    }
    if let Ok(integer) = row.try_get::<i64, _>(ordinal) {
        return Ok(integer.to_string());
    }
    if let Ok(real) = row.try_get::<f64, _>(ordinal) {
        return Ok(real.to_string());
    }
    if let Ok(stamp) = row.try_get::<NaiveDateTime, _>(ordinal) {
        return Ok(stamp.format(TIMESTAMP_FORMAT).to_string());
    }
    Err(undecodable_cell(column.name(), raw.type_info().name()))
}
