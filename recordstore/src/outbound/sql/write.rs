//! `INSERT`, `UPDATE` and `DELETE` rendering.

use std::collections::BTreeMap;

use crate::domain::ports::Statement;
use crate::domain::{Column, Dialect};

use super::dialect::{Binder, quote_column, quote_identifier};

/// Insert one row holding `fields`.
pub fn render_insert(dialect: Dialect, table: &str, fields: &BTreeMap<Column, String>) -> Statement {
    let mut binder = Binder::new(dialect);
    let mut names = Vec::with_capacity(fields.len());
    let mut placeholders = Vec::with_capacity(fields.len());
    for (column, value) in fields {
        names.push(quote_column(dialect, *column));
        placeholders.push(binder.bind(*column, value));
    }
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(dialect, table),
        names.join(", "),
        placeholders.join(", ")
    );
    binder.finish(sql)
}

/// Set `changes` on the row identified by `id`.
///
/// Callers must not pass an empty change set; there is no valid `SET` clause
/// for it.
pub fn render_update(
    dialect: Dialect,
    table: &str,
    id: &str,
    changes: &BTreeMap<Column, String>,
) -> Statement {
    let mut binder = Binder::new(dialect);
    let assignments = changes
        .iter()
        .map(|(column, value)| {
            format!(
                "{} = {}",
                quote_column(dialect, *column),
                binder.bind(*column, value)
            )
        })
        .collect::<Vec<_>>();
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = {}",
        quote_identifier(dialect, table),
        assignments.join(", "),
        quote_column(dialect, Column::Id),
        binder.bind(Column::Id, id)
    );
    binder.finish(sql)
}

/// Remove the row identified by `id`.
pub fn render_delete(dialect: Dialect, table: &str, id: &str) -> Statement {
    let mut binder = Binder::new(dialect);
    let sql = format!(
        "DELETE FROM {} WHERE {} = {}",
        quote_identifier(dialect, table),
        quote_column(dialect, Column::Id),
        binder.bind(Column::Id, id)
    );
    binder.finish(sql)
}
