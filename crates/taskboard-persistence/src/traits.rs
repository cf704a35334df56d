use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_core::TaskboardResult;
use uuid::Uuid;

/// Metadata for persistence operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceMetadata {
    /// Version of the persistence format
    pub format_version: u32,
    /// ID of the instance that performed the save
    pub instance_id: Uuid,
    /// When this data was saved
    pub saved_at: DateTime<Utc>,
}

impl PersistenceMetadata {
    pub fn new(format_version: u32, instance_id: Uuid) -> Self {
        Self {
            format_version,
            instance_id,
            saved_at: Utc::now(),
        }
    }
}

/// String-keyed storage holding one serialized snapshot per key.
///
/// Values are opaque strings; callers own the encoding. Implementations
/// handle different backends (file, memory).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` when absent
    async fn get(&self, key: &str) -> TaskboardResult<Option<String>>;

    /// Replace the value stored under `key`
    async fn set(&self, key: &str, value: String) -> TaskboardResult<()>;

    /// Delete `key`; absent keys are not an error
    async fn remove(&self, key: &str) -> TaskboardResult<()>;

    /// All keys currently stored, sorted
    async fn keys(&self) -> TaskboardResult<Vec<String>>;
}
