//! Dialect-aware SQL rendering for record statements.
//!
//! Every value is bound as a parameter; only identifiers are spliced into the
//! SQL text, and those are quoted for the target dialect. Table names must
//! pass [`is_valid_identifier`] before they reach a renderer.
//!
//! | Dialect    | Identifiers | Placeholders | Pagination                  |
//! |------------|-------------|--------------|-----------------------------|
//! | MySQL      | `` `x` ``   | `?`          | `LIMIT n OFFSET m`          |
//! | PostgreSQL | `"x"`       | `$n`         | `LIMIT n OFFSET m`          |
//! | SQLite     | `"x"`       | `?`          | `LIMIT n OFFSET m`          |
//! | SQL Server | `[x]`       | `@pN`        | `OFFSET m ROWS FETCH NEXT n`|
//!
//! PostgreSQL placeholders bound to timestamp columns carry a `::timestamp`
//! cast, since parameters are always sent as text.

mod ddl;
mod dialect;
mod select;
mod write;

pub use ddl::create_table_sql;
pub use dialect::{is_valid_identifier, quote_identifier};
pub use select::{render_count, render_select};
pub use write::{render_delete, render_insert, render_update};
