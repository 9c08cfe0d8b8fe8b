use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use super::{file_storage::FileStorage, memory_storage::MemoryStorage};
use crate::config::{StorageBackend, StorageConfig};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage file is not a JSON object: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("Session storage is persistent, but no backend config is provided")]
    MissingBackend,
}

/// The SessionStorage trait abstracts the durable key/value store the
/// session is written through to (get, set, remove).
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
    fn is_durable(&self) -> bool {
        // Real backends survive a restart; MemoryStorage returns false
        // so we can write better debug messages
        true
    }
}

/// Creates a concrete storage implementation based on the StorageConfig.
/// If `persistent = false`, returns MemoryStorage. Otherwise, picks the specified backend.
pub fn create_storage(config: &StorageConfig) -> Result<Arc<dyn SessionStorage>, StorageError> {
    if !config.persistent {
        info!("Session persistence is disabled. Using MemoryStorage.");
        return Ok(Arc::new(MemoryStorage::new()));
    }

    match &config.backend {
        Some(StorageBackend::File(file_config)) => {
            let storage = FileStorage::new(file_config)?;
            info!(
                "Session is persisted to file storage at {}",
                file_config.path.display()
            );
            Ok(Arc::new(storage))
        }
        None => Err(StorageError::MissingBackend),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_persistent_config_uses_memory() {
        let storage = create_storage(&StorageConfig::default()).unwrap();
        assert!(!storage.is_durable());
    }

    #[test]
    fn test_persistent_without_backend_is_an_error() {
        let config = StorageConfig {
            persistent: true,
            backend: None,
        };
        assert!(matches!(
            create_storage(&config),
            Err(StorageError::MissingBackend)
        ));
    }
}
