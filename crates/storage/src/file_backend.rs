//! File-based record store: one JSON file per namespace key.
//!
//! Storage location: `~/.mindnest/data/<key>.json`
//!
//! Writes go to a temporary sibling file that is then renamed over the
//! target, so a failed `set` never leaves a half-written blob behind.

use async_trait::async_trait;
use mindnest_core::error::StorageError;
use mindnest_core::store::{RecordStore, is_valid_key};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, warn};
use uuid::Uuid;

const EXTENSION: &str = "json";

/// A directory-backed record store.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        debug!(dir = %dir.display(), "File record store opened");
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{EXTENSION}"))
    }

    fn check_key(key: &str, err: fn(&str, &str) -> StorageError) -> Result<(), StorageError> {
        if is_valid_key(key) {
            Ok(())
        } else {
            Err(err(key, "invalid key"))
        }
    }
}

#[async_trait]
impl RecordStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::check_key(key, |k, r| StorageError::read(k, r))?;

        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::read(key, e)),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        Self::check_key(key, |k, r| StorageError::write(k, r))?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::write(key, format!("create data directory: {e}")))?;

        let target = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.{}.tmp", Uuid::new_v4()));

        if let Err(e) = tokio::fs::write(&tmp, value.as_bytes()).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StorageError::write(key, e));
        }

        if let Err(e) = tokio::fs::rename(&tmp, &target).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StorageError::write(key, e));
        }

        debug!(key, bytes = value.len(), "Record written");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(StorageError::write("*", e)),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::write("*", e))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == EXTENSION) {
                tokio::fs::remove_file(&path).await.map_err(|e| {
                    warn!(path = %path.display(), error = %e, "Failed to remove record file");
                    StorageError::write("*", e)
                })?;
            }
        }

        debug!(dir = %self.dir.display(), "Record store cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_and_get_persists() {
        let dir = tempfile::tempdir().unwrap();

        let store = FileStore::new(dir.path());
        store.set("userProfile", r#"{"name":"A"}"#.into()).await.unwrap();

        let content = std::fs::read_to_string(dir.path().join("userProfile.json")).unwrap();
        assert_eq!(content, r#"{"name":"A"}"#);

        // Reopen: the value survives
        let reopened = FileStore::new(dir.path());
        assert_eq!(
            reopened.get("userProfile").await.unwrap().as_deref(),
            Some(r#"{"name":"A"}"#)
        );
    }

    #[tokio::test]
    async fn missing_directory_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("not-created-yet"));
        assert!(store.get("moodEntries").await.unwrap().is_none());
        assert!(store.clear().await.is_ok());
    }

    #[tokio::test]
    async fn set_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set("moodEntries", "[]".into()).await.unwrap();
        store.set("moodEntries", "[1]".into()).await.unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["moodEntries.json".to_string()]);
    }

    #[tokio::test]
    async fn clear_removes_only_record_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "keep me").unwrap();

        let store = FileStore::new(dir.path());
        store.set("moodEntries", "[]".into()).await.unwrap();
        store.set("journalEntries", "[]".into()).await.unwrap();
        store.clear().await.unwrap();

        assert!(store.get("moodEntries").await.unwrap().is_none());
        assert!(store.get("journalEntries").await.unwrap().is_none());
        assert!(dir.path().join("notes.txt").exists());
    }

    #[tokio::test]
    async fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let err = store.set("../escape", "{}".into()).await.unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
        let err = store.get("../escape").await.unwrap_err();
        assert!(matches!(err, StorageError::Read { .. }));
    }
}
