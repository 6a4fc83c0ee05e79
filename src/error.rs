//! Error types for the case-management core.
//!
//! Every fallible operation returns [`Result`]. The taxonomy follows the
//! layer boundaries:
//! - validation errors: caller data violates a field rule, nothing written
//! - blocked transitions: dependent open records refuse a lifecycle change
//! - storage errors: the backing store rejected or failed a statement
//!
//! "Not found" is deliberately *not* an error: lookups return `Ok(None)` and
//! list queries return `Ok(vec![])`, so callers never conflate an empty
//! result with a failure.

use thiserror::Error;

/// Result type alias for case-management operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse error category for callers that branch on class rather than
/// message (the UI maps these to display styles).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-supplied data violated a field rule.
    Validation,
    /// A guarded lifecycle transition was refused.
    Blocked,
    /// The backing store failed or rejected a statement.
    Storage,
}

impl ErrorKind {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::Blocked => "TRANSITION_BLOCKED",
            Self::Storage => "STORAGE_ERROR",
        }
    }
}

/// Errors that can occur in repository and service operations.
#[derive(Error, Debug)]
pub enum Error {
    /// One or more field rules failed. All violations are collected before
    /// the operation fails, joined into a single message.
    #[error("Validation failed: {}", errors.join("; "))]
    Validation { errors: Vec<String> },

    /// An update was requested without the entity's identity field.
    #[error("{entity} ID must be provided.")]
    MissingId { entity: &'static str },

    /// A guarded transition was refused because dependent open records
    /// exist. The message names the dependency.
    #[error("{0}")]
    Blocked(String),

    /// A schema migration failed to apply. Migrations applied earlier in
    /// the same batch stay recorded.
    #[error("Migration {filename} failed: {source}")]
    Migration {
        filename: &'static str,
        source: rusqlite::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl Error {
    /// Map this error to its coarse category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::MissingId { .. } => ErrorKind::Validation,
            Self::Blocked(_) => ErrorKind::Blocked,
            Self::Migration { .. } | Self::Database(_) => ErrorKind::Storage,
        }
    }

    /// Build a validation error from collected messages.
    #[must_use]
    pub fn validation(errors: Vec<String>) -> Self {
        Self::Validation { errors }
    }
}
