//! Unified error types for the tracker.
//!
//! Validation, referential-integrity, not-found and conflict failures are kept
//! apart from infrastructure failures so callers can react to each kind.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed, missing or out-of-range input field.
    #[error("Invalid `{field}`: {message}")]
    Validation {
        /// Name (or JSON path) of the offending field
        field: String,
        /// Why the value was rejected
        message: String,
    },

    /// A foreign key names a parent record that does not exist.
    #[error("`{field}` references {entity} {id}, which does not exist")]
    ReferentialIntegrity {
        /// Parent entity name
        entity: &'static str,
        /// Foreign key field
        field: &'static str,
        /// Dangling key
        id: i64,
    },

    /// Lookup by key found nothing.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity name
        entity: &'static str,
        /// Requested key
        id: i64,
    },

    /// Duplicate value in a unique field.
    #[error("Conflict: {message}")]
    Conflict {
        /// Description of the clash
        message: String,
    },

    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for building a [`Error::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Stable machine-readable kind reported to RPC callers.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::ReferentialIntegrity { .. } => "referential_integrity_error",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Config { .. } => "configuration_error",
            Self::Database(_) => "database_error",
            Self::Io(_) => "io_error",
        }
    }

    /// The offending field, for errors tied to one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field.as_str()),
            Self::ReferentialIntegrity { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
