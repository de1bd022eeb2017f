//! In-memory store: useful for testing and ephemeral sessions.

use async_trait::async_trait;
use mindnest_core::error::StorageError;
use mindnest_core::store::RecordStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A record store that keeps blobs in a HashMap.
/// Nothing survives the process.
#[derive(Clone)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of keys currently held.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.entries.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_and_get() {
        let store = InMemoryStore::new();
        store.set("moodEntries", "[]".into()).await.unwrap();
        assert_eq!(store.get("moodEntries").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn missing_key_is_none() {
        let store = InMemoryStore::new();
        assert!(store.get("userProfile").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_replaces_whole_value() {
        let store = InMemoryStore::new();
        store.set("k", "[1]".into()).await.unwrap();
        store.set("k", "[1,2]".into()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("[1,2]"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn clear_all() {
        let store = InMemoryStore::new();
        store.set("a", "1".into()).await.unwrap();
        store.set("b", "2".into()).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.is_empty().await);
    }
}
