//! PostgreSQL-backed `SqlExecutor` implementation.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::postgres::{PgColumn, PgPool, PgPoolOptions, PgRow};
use sqlx::{Column as _, Postgres, Row as _, TypeInfo as _, ValueRef as _};

use crate::domain::ports::{Row, SqlExecutor, SqlExecutorError, Statement};
use crate::domain::{TIMESTAMP_FORMAT, format_timestamp};

use super::config::ExecutorConfig;
use super::error_mapping::{map_sqlx_error, undecodable_cell};

/// Executor over a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PostgresSqlExecutor {
    pool: PgPool,
}

impl PostgresSqlExecutor {
    /// Build a pool from `config` and check one connection out.
    ///
    /// # Errors
    ///
    /// Returns [`SqlExecutorError::Connection`] when the server cannot be
    /// reached within the acquire timeout.
    pub async fn connect(config: &ExecutorConfig) -> Result<Self, SqlExecutorError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections())
            .acquire_timeout(config.acquire_timeout())
            .connect(config.database_url())
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SqlExecutor for PostgresSqlExecutor {
    async fn execute(&self, statement: &Statement) -> Result<u64, SqlExecutorError> {
        let query = statement
            .params
            .iter()
            .fold(sqlx::query::<Postgres>(&statement.sql), |query, param| {
                query.bind(param.as_str())
            });
        let result = query.execute(&self.pool).await.map_err(map_sqlx_error)?;
        Ok(result.rows_affected())
    }

    async fn select_rows(&self, statement: &Statement) -> Result<Vec<Row>, SqlExecutorError> {
        let query = statement
            .params
            .iter()
            .fold(sqlx::query::<Postgres>(&statement.sql), |query, param| {
                query.bind(param.as_str())
            });
        let rows = query.fetch_all(&self.pool).await.map_err(map_sqlx_error)?;
        rows.iter().map(decode_row).collect()
    }
}

fn decode_row(row: &PgRow) -> Result<Row, SqlExecutorError> {
    row.columns()
        .iter()
        .map(|column| Ok((column.name().to_owned(), decode_cell(row, column)?)))
        .collect()
}

fn decode_cell(row: &PgRow, column: &PgColumn) -> Result<String, SqlExecutorError> {
    let ordinal = column.ordinal();
    let raw = row.try_get_raw(ordinal).map_err(map_sqlx_error)?;
    if raw.is_null() {
        return Ok(String::new());
    }
    if let Ok(text) = row.try_get::<String, _>(ordinal) {
        return Ok(text);
    }
    if let Ok(stamp) = row.try_get::<NaiveDateTime, _>(ordinal) {
        return Ok(stamp.format(TIMESTAMP_FORMAT).to_string());
    }
    if let Ok(stamp) = row.try_get::<DateTime<Utc>, _>(ordinal) {
        return Ok(format_timestamp(stamp));
    }
    if let Ok(integer) = row.try_get::<i64, _>(ordinal) {
        return Ok(integer.to_string());
    }
    if let Ok(integer) = row.try_get::<i32, _>(ordinal) {
        return Ok(integer.to_string());
    }
    if let Ok(real) = row.try_get::<f64, _>(ordinal) {
        return Ok(real.to_string());
    }
    if let Ok(flag) = row.try_get::<bool, _>(ordinal) {
        return Ok(flag.to_string());
    }
    Err(undecodable_cell(column.name(), raw.type_info().name()))
}
