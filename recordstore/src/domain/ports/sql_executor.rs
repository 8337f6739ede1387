//! Port for executing rendered SQL statements.
//!
//! The store never talks to a driver directly. It renders a [`Statement`] and
//! hands it to a [`SqlExecutor`], which either reports the number of affected
//! rows or returns the selected rows as string maps. Keeping cells as strings
//! mirrors how records are modelled: every column is text on the way in and
//! on the way out.

use std::collections::HashMap;

use async_trait::async_trait;

use super::define_port_error;

/// A selected row keyed by column name. SQL `NULL` reads as an empty string.
pub type Row = HashMap<String, String>;

/// SQL text with positional parameters bound in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Dialect-specific SQL.
    pub sql: String,
    /// Parameter values, bound as text.
    pub params: Vec<String>,
}

impl Statement {
    /// Create a statement with bound parameters.
    pub fn new(sql: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Create a statement that binds nothing, such as DDL.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::new(sql, Vec::new())
    }
}

define_port_error! {
    /// Errors raised by SQL executor adapters.
    pub enum SqlExecutorError {
        /// The database could not be reached or the pool is exhausted.
        Connection { message: String } =>
            "sql executor connection failed: {message}",
        /// The statement was rejected or failed while running.
        Query { message: String } =>
            "sql executor query failed: {message}",
        /// A selected cell could not be represented as text.
        Decode { column: String, message: String } =>
            "failed to decode column {column}: {message}",
    }
}

/// Port for running statements against a SQL backend.
///
/// Implementations own connection management. They must bind
/// [`Statement::params`] in order and must not retry on their own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Run a statement that returns no rows and report the affected count.
    async fn execute(&self, statement: &Statement) -> Result<u64, SqlExecutorError>;

    /// Run a query and return every row.
    async fn select_rows(&self, statement: &Statement) -> Result<Vec<Row>, SqlExecutorError>;
}

/// Fixture implementation for tests that do not exercise persistence.
///
/// Writes report zero affected rows and selects return nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSqlExecutor;

#[async_trait]
impl SqlExecutor for FixtureSqlExecutor {
    async fn execute(&self, _statement: &Statement) -> Result<u64, SqlExecutorError> {
        Ok(0)
    }

    async fn select_rows(&self, _statement: &Statement) -> Result<Vec<Row>, SqlExecutorError> {
        Ok(Vec::new())
    }
}
