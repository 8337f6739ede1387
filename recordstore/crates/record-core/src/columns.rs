//! Column vocabulary shared by the record entity and the query planner.

use std::fmt;
use std::str::FromStr;

use crate::error::RecordError;

/// Value stored in `soft_deleted_at` while a record is live.
///
/// Keeping a far-future timestamp instead of `NULL` reduces the visibility
/// check to a single `soft_deleted_at > now` comparison.
pub const MAX_DATETIME: &str = "9999-12-31 23:59:59";

/// A column of the record table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    /// Primary key, at most 40 characters.
    Id,
    /// Free-form category tag, at most 100 characters.
    RecordType,
    /// Serialised JSON object holding the domain data.
    Payload,
    /// Serialised JSON object of string annotations.
    Metas,
    /// Free-text note.
    Memo,
    /// Creation timestamp.
    CreatedAt,
    /// Timestamp of the last successful write.
    UpdatedAt,
    /// Deletion timestamp, or [`MAX_DATETIME`] while live.
    SoftDeletedAt,
}

impl Column {
    /// Every column in table order.
    pub const ALL: [Self; 8] = [
        Self::Id,
        Self::RecordType,
        Self::Payload,
        Self::Metas,
        Self::Memo,
        Self::CreatedAt,
        Self::UpdatedAt,
        Self::SoftDeletedAt,
    ];

    /// Column name as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::RecordType => "record_type",
            Self::Payload => "payload",
            Self::Metas => "metas",
            Self::Memo => "memo",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::SoftDeletedAt => "soft_deleted_at",
        }
    }

    /// Whether the column holds a timestamp.
    #[must_use]
    pub const fn is_datetime(self) -> bool {
        matches!(
            self,
            Self::CreatedAt | Self::UpdatedAt | Self::SoftDeletedAt
        )
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = RecordError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|column| column.as_str() == value)
            .ok_or_else(|| RecordError::unknown_column(value))
    }
}
