//! Error types for the MindNest domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error type; none of them is fatal to the
//! process.

use thiserror::Error;

/// The top-level error type for all MindNest operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Storage errors ---
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    // --- Validation errors ---
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // --- Completion errors ---
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures of the persistent record store and the repositories on top of it.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// A persisted blob could not be read or decoded.
    #[error("Failed to read '{key}': {reason}")]
    Read { key: String, reason: String },

    /// A value could not be persisted. The previous value is left intact.
    #[error("Failed to write '{key}': {reason}")]
    Write { key: String, reason: String },
}

impl StorageError {
    pub fn read(key: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Read {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    pub fn write(key: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Write {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// The namespace key the failure relates to.
    pub fn key(&self) -> &str {
        match self {
            Self::Read { key, .. } | Self::Write { key, .. } => key,
        }
    }
}

/// Required input missing before a record may be saved.
///
/// The message is meant to be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields. Missing: {}", .0.join(", "))]
    MissingProfileFields(Vec<&'static str>),

    #[error("Please select a mood and enter your thoughts.")]
    IncompleteMoodEntry,

    #[error("Please write something before saving.")]
    EmptyJournalEntry,

    #[error("Unknown {field}: '{value}'")]
    UnknownValue { field: &'static str, value: String },
}

/// Failures of one exchange with the external completion service.
///
/// Every variant renders a human-readable message; the assistant session
/// uses that message verbatim as the assistant's reply.
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    #[error("{message}")]
    Api { status_code: u16, message: String },

    #[error("{0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Malformed(String),

    /// The response carried no `choices[0].message.content`.
    #[error("Something went wrong!")]
    EmptyResponse,

    #[error("Completion service not configured: {0}")]
    NotConfigured(String),
}
