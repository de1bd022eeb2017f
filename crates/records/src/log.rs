//! Append-only logs over the record store.
//!
//! A log is one namespace key holding a JSON array. `append` is a
//! read-modify-write of the whole array: read the persisted sequence, push
//! in memory, write the whole sequence back with one `set`.
//!
//! Two strategies implement [`AppendLog`]:
//! - [`UnguardedLog`] performs the read-modify-write as-is. Two overlapping
//!   appends can both read the same sequence, and the later write wins, so
//!   one entry is lost.
//! - [`SerializedLog`] holds a per-log async mutex across the whole
//!   read-modify-write, so appends through the same instance never race.

use async_trait::async_trait;
use mindnest_core::error::StorageError;
use mindnest_core::record::{JournalEntry, MoodEntry};
use mindnest_core::store::{RecordStore, keys};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

/// A record type that lives in an append-only log.
pub trait LogEntry: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The namespace key holding the log's array.
    const KEY: &'static str;
}

impl LogEntry for MoodEntry {
    const KEY: &'static str = keys::MOOD_ENTRIES;
}

impl LogEntry for JournalEntry {
    const KEY: &'static str = keys::JOURNAL_ENTRIES;
}

/// An ordered, append-only collection of `T`.
///
/// No update or delete is exposed; corrections are new entries.
#[async_trait]
pub trait AppendLog<T: LogEntry>: Send + Sync {
    /// Add one entry at the end of the log.
    ///
    /// Fails with `StorageError::Read` if the persisted array cannot be
    /// decoded (the unreadable blob is left untouched), and with
    /// `StorageError::Write` if the new array cannot be persisted.
    async fn append(&self, entry: T) -> Result<(), StorageError>;

    /// Every entry in insertion order, surfacing decode failures.
    async fn try_all(&self) -> Result<Vec<T>, StorageError>;

    /// Every entry in insertion order. An unreadable log reads as empty.
    async fn all(&self) -> Vec<T> {
        match self.try_all().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(key = T::KEY, error = %e, "Unreadable log treated as empty");
                Vec::new()
            }
        }
    }
}

/// Decode the array stored under `T::KEY`. A missing key is an empty log.
pub(crate) async fn read_sequence<T: LogEntry>(
    store: &dyn RecordStore,
) -> Result<Vec<T>, StorageError> {
    match store.get(T::KEY).await? {
        None => Ok(Vec::new()),
        Some(blob) => serde_json::from_str(&blob).map_err(|e| StorageError::read(T::KEY, e)),
    }
}

async fn read_modify_write<T: LogEntry>(
    store: &dyn RecordStore,
    entry: T,
) -> Result<(), StorageError> {
    let mut entries = read_sequence::<T>(store).await.inspect_err(|e| {
        error!(key = T::KEY, error = %e, "Refusing to append to an unreadable log");
    })?;
    entries.push(entry);

    let blob = serde_json::to_string(&entries).map_err(|e| StorageError::write(T::KEY, e))?;
    store.set(T::KEY, blob).await.inspect_err(|e| {
        error!(key = T::KEY, error = %e, "Failed to save log entry");
    })?;

    debug!(key = T::KEY, len = entries.len(), "Log entry appended");
    Ok(())
}

/// Plain read-modify-write appends.
pub struct UnguardedLog<T> {
    store: Arc<dyn RecordStore>,
    _entry: PhantomData<fn() -> T>,
}

impl<T: LogEntry> UnguardedLog<T> {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            _entry: PhantomData,
        }
    }
}

#[async_trait]
impl<T: LogEntry> AppendLog<T> for UnguardedLog<T> {
    async fn append(&self, entry: T) -> Result<(), StorageError> {
        read_modify_write(self.store.as_ref(), entry).await
    }

    async fn try_all(&self) -> Result<Vec<T>, StorageError> {
        read_sequence(self.store.as_ref()).await
    }
}

/// Read-modify-write appends serialized by a per-log lock.
pub struct SerializedLog<T> {
    store: Arc<dyn RecordStore>,
    write_lock: Mutex<()>,
    _entry: PhantomData<fn() -> T>,
}

impl<T: LogEntry> SerializedLog<T> {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
            _entry: PhantomData,
        }
    }
}

#[async_trait]
impl<T: LogEntry> AppendLog<T> for SerializedLog<T> {
    async fn append(&self, entry: T) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        read_modify_write(self.store.as_ref(), entry).await
    }

    async fn try_all(&self) -> Result<Vec<T>, StorageError> {
        read_sequence(self.store.as_ref()).await
    }
}
