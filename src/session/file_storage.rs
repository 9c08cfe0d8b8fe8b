use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::{SessionStorage, StorageError};

/// The config needed for the file backend: a JSON document holding every key.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct FileStorageConfig {
    pub path: PathBuf,
}

/// Keeps the session in a single JSON object on disk. Every write replaces
/// the file through a sibling temp file, so a crash never leaves half a document.
pub struct FileStorage {
    path: PathBuf,
    // Serialises read-modify-write cycles.
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(config: &FileStorageConfig) -> Result<Self, StorageError> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            path: config.path.clone(),
            lock: Mutex::new(()),
        })
    }

    fn read_all(&self) -> Result<Map<String, Value>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(Map::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &Map<String, Value>) -> Result<(), StorageError> {
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!("Wrote {} session keys to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().expect("file storage mutex poisoned");
        let entries = self.read_all()?;
        Ok(entries.get(key).and_then(Value::as_str).map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().expect("file storage mutex poisoned");
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), Value::from(value));
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().expect("file storage mutex poisoned");
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str) -> FileStorageConfig {
        let dir = std::env::temp_dir().join(format!("seolma-{}-{}", name, uuid::Uuid::new_v4()));
        FileStorageConfig {
            path: dir.join("session.json"),
        }
    }

    #[test]
    fn test_values_survive_a_new_instance() {
        let config = temp_config("survive");
        let storage = FileStorage::new(&config).unwrap();
        storage.set("accessToken", "abc").unwrap();
        storage.set("user", r#"{"userId":"u1"}"#).unwrap();

        let reopened = FileStorage::new(&config).unwrap();
        assert_eq!(reopened.get("accessToken").unwrap().as_deref(), Some("abc"));
        assert_eq!(
            reopened.get("user").unwrap().as_deref(),
            Some(r#"{"userId":"u1"}"#)
        );

        reopened.remove("accessToken").unwrap();
        assert_eq!(storage.get("accessToken").unwrap(), None);
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let storage = FileStorage::new(&temp_config("missing")).unwrap();
        assert_eq!(storage.get("anything").unwrap(), None);
        storage.remove("anything").unwrap();
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let config = temp_config("corrupt");
        let storage = FileStorage::new(&config).unwrap();
        fs::write(&config.path, "[1, 2, 3]").unwrap();
        assert!(matches!(
            storage.get("accessToken"),
            Err(StorageError::Corrupt(_))
        ));
    }
}
