//! Schema-light record store over SQL.
//!
//! A single table holds heterogeneous "records": an identifier, a type tag, a
//! JSON payload, string metadata, a memo and soft-delete timestamps. The
//! crate is laid out hexagonally:
//!
//! - [`domain`] re-exports the pure record model from `record_core` and
//!   declares the [`domain::ports::SqlExecutor`] port.
//! - [`outbound`] renders statements per SQL dialect and implements the port
//!   on top of `sqlx`.
//! - [`store`] is the facade that ties record, query planning, rendering and
//!   execution together.
//! - [`config`] loads store settings through `OrthoConfig`.

pub mod config;
pub mod domain;
pub mod outbound;
pub mod store;

pub use store::{RecordStore, RecordStoreError, StoreOptions};
