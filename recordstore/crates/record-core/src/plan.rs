//! Portable description of a record `SELECT`.
//!
//! A [`SelectPlan`] is what [`crate::RecordQuery::to_plan`] produces: the
//! target table, a conjunction of [`Predicate`]s, the projected columns and
//! the ordering and pagination. It carries no SQL text. Adapters render it for
//! the [`Dialect`] it is tagged with.

use std::fmt;
use std::str::FromStr;

use crate::columns::Column;
use crate::error::RecordError;

/// SQL dialects the planner can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// MySQL and MariaDB.
    MySql,
    /// PostgreSQL.
    Postgres,
    /// SQLite 3.
    Sqlite,
    /// Microsoft SQL Server.
    MsSql,
}

impl Dialect {
    /// Canonical lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
            Self::MsSql => "mssql",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = RecordError;

    /// Accepts the canonical names plus the usual driver aliases.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "postgres" | "postgresql" | "pgx" => Ok(Self::Postgres),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "mssql" | "sqlserver" => Ok(Self::MsSql),
            _ => Err(RecordError::unknown_dialect(value)),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest first.
    Ascending,
    /// Largest first.
    #[default]
    Descending,
}

/// Ordering applied to a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    /// Column to sort on.
    pub column: Column,
    /// Direction of the sort.
    pub direction: SortOrder,
}

/// A boolean condition over record columns.
///
/// Values are bound as parameters by the renderer, never spliced into SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `column = value`.
    Eq {
        /// Compared column.
        column: Column,
        /// Bound value.
        value: String,
    },
    /// `column > value`.
    Gt {
        /// Compared column.
        column: Column,
        /// Bound value.
        value: String,
    },
    /// `column LIKE pattern`.
    Like {
        /// Matched column.
        column: Column,
        /// Pattern including wildcards.
        pattern: String,
    },
    /// `column NOT LIKE pattern`.
    NotLike {
        /// Matched column.
        column: Column,
        /// Pattern including wildcards.
        pattern: String,
    },
    /// Any of the nested predicates.
    Or(Vec<Predicate>),
    /// All of the nested predicates.
    And(Vec<Predicate>),
}

impl Predicate {
    /// `column = value`.
    #[must_use]
    pub fn equals(column: Column, value: impl Into<String>) -> Self {
        Self::Eq {
            column,
            value: value.into(),
        }
    }

    /// `column > value`.
    #[must_use]
    pub fn greater_than(column: Column, value: impl Into<String>) -> Self {
        Self::Gt {
            column,
            value: value.into(),
        }
    }

    /// `column LIKE '%needle%'`.
    #[must_use]
    pub fn contains(column: Column, needle: &str) -> Self {
        Self::Like {
            column,
            pattern: format!("%{needle}%"),
        }
    }

    /// `column NOT LIKE '%needle%'`.
    #[must_use]
    pub fn not_contains(column: Column, needle: &str) -> Self {
        Self::NotLike {
            column,
            pattern: format!("%{needle}%"),
        }
    }
}

/// Everything a renderer needs to build a `SELECT` over the record table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectPlan {
    /// Dialect the plan is meant for.
    pub dialect: Dialect,
    /// Unquoted table name.
    pub table: String,
    /// Conditions combined with `AND`. Empty means unfiltered.
    pub predicates: Vec<Predicate>,
    /// Explicit projection. Empty means every column.
    pub projection: Vec<Column>,
    /// Optional ordering.
    pub order: Option<OrderBy>,
    /// Maximum number of rows.
    pub limit: Option<u64>,
    /// Number of rows to skip.
    pub offset: Option<u64>,
}

impl SelectPlan {
    /// An unfiltered selection of every column of `table`.
    #[must_use]
    pub fn new(dialect: Dialect, table: impl Into<String>) -> Self {
        Self {
            dialect,
            table: table.into(),
            predicates: Vec::new(),
            projection: Vec::new(),
            order: None,
            limit: None,
            offset: None,
        }
    }

    /// Columns to select, with an empty projection expanded to all columns.
    #[must_use]
    pub fn projected_columns(&self) -> &[Column] {
        if self.projection.is_empty() {
            &Column::ALL
        } else {
            &self.projection
        }
    }

    /// Whether the plan filters rows at all.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        !self.predicates.is_empty()
    }
}
