use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::session::file_storage::FileStorageConfig;

/// Where the session (access token + user profile) is persisted:
/// - persistent: if false, the session only lives in memory (MemoryStorage).
/// - backend: the durable backend used when persistence is on.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct StorageConfig {
    pub persistent: bool,
    #[serde(flatten)]
    pub backend: Option<StorageBackend>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            persistent: false,
            backend: None,
        }
    }
}

/// The existing storage backends, selected via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(tag = "type")]
pub enum StorageBackend {
    #[serde(rename = "file")]
    File(FileStorageConfig),
}
