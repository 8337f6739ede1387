//! Outbound adapters for SQL backends.
//!
//! - **sql**: renders record statements for each supported dialect.
//! - **persistence**: `sqlx`-backed [`crate::domain::ports::SqlExecutor`]
//!   implementations for SQLite and PostgreSQL.
//!
//! Adapters translate between the store's portable types and the backend.
//! They hold no record semantics of their own.

pub mod persistence;
pub mod sql;
