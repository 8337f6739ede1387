//! `sqlx`-backed executors for the record store.
//!
//! Each adapter implements [`crate::domain::ports::SqlExecutor`] over a
//! `sqlx` pool:
//!
//! - **Text parameters**: every bound value is a string. Dialect casts, such
//!   as PostgreSQL's `::timestamp`, are rendered into the SQL by
//!   [`crate::outbound::sql`].
//! - **Text cells**: selected cells are decoded into strings. Timestamps use
//!   the sortable `YYYY-MM-DD HH:MM:SS` form and `NULL` reads as `""`.
//! - **Mapped errors**: `sqlx` failures become
//!   [`crate::domain::ports::SqlExecutorError`] values.
//!
//! # Example
//!
//! ```ignore
//! use recordstore::outbound::persistence::{ExecutorConfig, PostgresSqlExecutor};
//!
//! let config = ExecutorConfig::new("postgres://localhost/records");
//! let executor = PostgresSqlExecutor::connect(&config).await?;
//! ```

mod config;
mod error_mapping;
mod postgres_executor;
mod sqlite_executor;

pub use config::ExecutorConfig;
pub use postgres_executor::PostgresSqlExecutor;
pub use sqlite_executor::SqliteSqlExecutor;
