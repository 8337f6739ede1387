//! Errors raised by the record model and the query planner.

use thiserror::Error;

use crate::columns::Column;

/// Failures surfaced by [`crate::Record`] accessors and [`crate::RecordQuery`].
#[derive(Debug, Error)]
pub enum RecordError {
    /// A query filter was explicitly set to an unusable value.
    #[error("invalid query: {message}")]
    Validation {
        /// Which filter was rejected.
        message: String,
    },

    /// Stored JSON could not be parsed.
    #[error("failed to decode {column} as JSON: {source}")]
    Decode {
        /// Column holding the corrupt value.
        column: Column,
        /// Underlying parser failure.
        #[source]
        source: serde_json::Error,
    },

    /// An in-memory value could not be serialised.
    #[error("failed to encode {column} as JSON: {source}")]
    Encode {
        /// Column that was being written.
        column: Column,
        /// Underlying serialiser failure.
        #[source]
        source: serde_json::Error,
    },

    /// A name did not match any record column.
    #[error("unknown column `{name}`")]
    UnknownColumn {
        /// Name that failed to resolve.
        name: String,
    },

    /// A name did not match any supported SQL dialect.
    #[error("unknown SQL dialect `{name}`")]
    UnknownDialect {
        /// Name that failed to resolve.
        name: String,
    },
}

impl RecordError {
    /// Create a validation error with the given message.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an unknown column error.
    #[must_use]
    pub fn unknown_column(name: impl Into<String>) -> Self {
        Self::UnknownColumn { name: name.into() }
    }

    /// Create an unknown dialect error.
    #[must_use]
    pub fn unknown_dialect(name: impl Into<String>) -> Self {
        Self::UnknownDialect { name: name.into() }
    }

    #[must_use]
    pub(crate) const fn decode(column: Column, source: serde_json::Error) -> Self {
        Self::Decode { column, source }
    }

    #[must_use]
    pub(crate) const fn encode(column: Column, source: serde_json::Error) -> Self {
        Self::Encode { column, source }
    }
}
