//! Record store trait: the durable key → JSON blob namespace.
//!
//! The store is the single source of truth for everything that must survive
//! a restart. It knows nothing about record schemas: values are opaque
//! JSON-encoded strings, and decoding them is the repositories' job.

use crate::error::StorageError;
use async_trait::async_trait;

/// The fixed namespace keys.
pub mod keys {
    /// The singleton profile object.
    pub const USER_PROFILE: &str = "userProfile";
    /// The ordered array of mood entries.
    pub const MOOD_ENTRIES: &str = "moodEntries";
    /// The ordered array of journal entries.
    pub const JOURNAL_ENTRIES: &str = "journalEntries";

    pub const ALL: [&str; 3] = [USER_PROFILE, MOOD_ENTRIES, JOURNAL_ENTRIES];
}

/// The core RecordStore trait.
///
/// Implementations: in-memory (for testing), file-per-key, SQLite.
///
/// `set` never partially applies: it either replaces the whole value under
/// `key` or fails leaving the previous value untouched. No operation spans
/// more than one key.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// The backend name (e.g., "file", "sqlite", "in_memory").
    fn name(&self) -> &str;

    /// Fetch the blob stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the blob stored under `key`.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Remove every key in the namespace.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Whether `key` is safe to use as a namespace key on every backend.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
