//! Record entity and query planning primitives for the record store.
//!
//! A record is a row of a single schema-light table: an identifier, a type
//! tag, a JSON payload, flat string metadata, a memo and three timestamps.
//! This crate owns the pure half of the store:
//!
//! - [`Record`] wraps a [`DirtyTracked`] field bag so writes can be limited to
//!   the columns that actually changed.
//! - [`RecordQuery`] collects filter, sort and pagination options and turns
//!   them into a dialect-tagged [`SelectPlan`] that SQL adapters render.
//!
//! Nothing here performs I/O. Time is read through [`mockable::Clock`] or
//! passed in explicitly so planning stays deterministic under test.

pub mod columns;
pub mod dirty;
pub mod error;
pub mod plan;
pub mod query;
pub mod record;
pub mod timestamp;

pub use columns::{Column, MAX_DATETIME};
pub use dirty::DirtyTracked;
pub use error::RecordError;
pub use plan::{Dialect, OrderBy, Predicate, SelectPlan, SortOrder};
pub use query::{DEFAULT_OFFSET_LIMIT, RecordQuery};
pub use record::Record;
pub use timestamp::{TIMESTAMP_FORMAT, format_timestamp, parse_timestamp};
