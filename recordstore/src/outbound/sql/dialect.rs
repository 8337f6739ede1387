//! Identifier quoting and parameter placeholders per dialect.

use crate::domain::ports::Statement;
use crate::domain::{Column, Dialect};

/// Longest identifier accepted, matching PostgreSQL's limit.
const MAX_IDENTIFIER_LEN: usize = 63;

/// Whether `name` is safe to use as a table name on every dialect.
///
/// Accepts ASCII letters, digits and underscores, not starting with a digit,
/// up to 63 characters.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    name.len() <= MAX_IDENTIFIER_LEN
        && (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Quote an identifier for `dialect`, escaping embedded quote characters.
pub fn quote_identifier(dialect: Dialect, name: &str) -> String {
    match dialect {
        Dialect::MySql => format!("`{}`", name.replace('`', "``")),
        Dialect::Postgres | Dialect::Sqlite => format!("\"{}\"", name.replace('"', "\"\"")),
        Dialect::MsSql => format!("[{}]", name.replace(']', "]]")),
    }
}

pub(super) fn quote_column(dialect: Dialect, column: Column) -> String {
    quote_identifier(dialect, column.as_str())
}

/// Accumulates bound values and hands out the matching placeholders.
pub(super) struct Binder {
    dialect: Dialect,
    params: Vec<String>,
}

impl Binder {
    pub(super) const fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            params: Vec::new(),
        }
    }

    /// Bind `value` as a parameter compared against `column`.
    pub(super) fn bind(&mut self, column: Column, value: &str) -> String {
        self.params.push(value.to_owned());
        let position = self.params.len();
        match self.dialect {
            Dialect::Postgres if column.is_datetime() => format!("${position}::timestamp"),
            Dialect::Postgres => format!("${position}"),
            Dialect::MsSql => format!("@p{position}"),
            Dialect::MySql | Dialect::Sqlite => "?".to_owned(),
        }
    }

    pub(super) fn finish(self, sql: String) -> Statement {
        Statement::new(sql, self.params)
    }
}
