//! Domain layer: the record model and the ports adapters implement.
//!
//! The record entity and query planner live in the `record_core` crate so
//! they stay free of async and database dependencies; they are re-exported
//! here for callers of the store.

pub mod ports;

pub use record_core::{
    Column, DEFAULT_OFFSET_LIMIT, Dialect, DirtyTracked, MAX_DATETIME, OrderBy, Predicate, Record,
    RecordError, RecordQuery, SelectPlan, SortOrder, TIMESTAMP_FORMAT, format_timestamp,
    parse_timestamp,
};
