//! Record store implementations for MindNest.
//!
//! All backends implement the `mindnest_core::RecordStore` trait.
//! `build_from_config` selects one from the storage configuration.

pub mod file_backend;
pub mod in_memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file_backend::FileStore;
pub use in_memory::InMemoryStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

use mindnest_config::{StorageBackend, StorageConfig};
use mindnest_core::error::StorageError;
use mindnest_core::store::RecordStore;
use std::sync::Arc;

/// Open the record store described by `config`.
pub async fn build_from_config(
    config: &StorageConfig,
) -> Result<Arc<dyn RecordStore>, StorageError> {
    match config.backend {
        StorageBackend::File => Ok(Arc::new(FileStore::new(config.data_dir()))),
        StorageBackend::Memory => Ok(Arc::new(InMemoryStore::new())),
        #[cfg(feature = "sqlite")]
        StorageBackend::Sqlite => {
            let dir = config.data_dir();
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|e| StorageError::write("*", format!("create data directory: {e}")))?;
            let url = format!("sqlite://{}", dir.join("records.sqlite").display());
            Ok(Arc::new(SqliteStore::new(&url).await?))
        }
        #[cfg(not(feature = "sqlite"))]
        StorageBackend::Sqlite => Err(StorageError::write(
            "*",
            "built without the `sqlite` feature",
        )),
    }
}
