use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{KeyValueStore, PersistenceMetadata};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use taskboard_core::{TaskboardError, TaskboardResult};
use tokio::sync::Mutex;
use uuid::Uuid;

pub const FORMAT_VERSION: u32 = 1;

/// On-disk layout: every key's value stored as a string inside one JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEnvelope {
    pub version: u32,
    pub metadata: PersistenceMetadata,
    pub entries: BTreeMap<String, String>,
}

/// JSON file-based key/value store
///
/// Every `set` rewrites the whole file atomically. Reads go to disk each
/// time so a second process sees the latest save.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    instance_id: Uuid,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id: Uuid::new_v4(),
            lock: Mutex::new(()),
        }
    }

    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    async fn read_envelope(&self) -> TaskboardResult<Option<FileEnvelope>> {
        if !self.exists().await {
            return Ok(None);
        }
        let bytes = AtomicWriter::read_all(&self.path).await?;
        let envelope: FileEnvelope = serde_json::from_slice(&bytes)
            .map_err(|e| TaskboardError::Serialization(e.to_string()))?;
        if envelope.version != FORMAT_VERSION {
            return Err(TaskboardError::Serialization(format!(
                "Unsupported format version: {}",
                envelope.version
            )));
        }
        Ok(Some(envelope))
    }

    /// Current entries for a write; an unreadable file is replaced rather
    /// than blocking every future save.
    async fn entries_for_write(&self) -> BTreeMap<String, String> {
        match self.read_envelope().await {
            Ok(Some(envelope)) => envelope.entries,
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(
                    "Discarding unreadable store at {}: {}",
                    self.path.display(),
                    e
                );
                BTreeMap::new()
            }
        }
    }

    async fn write_entries(&self, entries: BTreeMap<String, String>) -> TaskboardResult<()> {
        let envelope = FileEnvelope {
            version: FORMAT_VERSION,
            metadata: PersistenceMetadata::new(FORMAT_VERSION, self.instance_id),
            entries,
        };
        let json_bytes = serde_json::to_vec_pretty(&envelope)
            .map_err(|e| TaskboardError::Serialization(e.to_string()))?;

        AtomicWriter::write_atomic(&self.path, &json_bytes).await?;

        tracing::info!(
            "Saved {} bytes ({} keys) to {}",
            json_bytes.len(),
            envelope.entries.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[async_trait::async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> TaskboardResult<Option<String>> {
        let envelope = self.read_envelope().await?;
        Ok(envelope.and_then(|mut e| e.entries.remove(key)))
    }

    async fn set(&self, key: &str, value: String) -> TaskboardResult<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.entries_for_write().await;
        entries.insert(key.to_string(), value);
        self.write_entries(entries).await
    }

    async fn remove(&self, key: &str) -> TaskboardResult<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.entries_for_write().await;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_entries(entries).await
    }

    async fn keys(&self) -> TaskboardResult<Vec<String>> {
        let envelope = self.read_envelope().await?;
        Ok(envelope
            .map(|e| e.entries.into_keys().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_set_and_get() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("board.json"));

        assert!(!store.exists().await);
        assert_eq!(store.get("boardTimers").await.unwrap(), None);

        store
            .set("boardTimers", r#"{"1":42}"#.to_string())
            .await
            .unwrap();
        assert!(store.exists().await);
        assert_eq!(
            store.get("boardTimers").await.unwrap().as_deref(),
            Some(r#"{"1":42}"#)
        );
    }

    #[tokio::test]
    async fn test_second_instance_sees_saved_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("board.json");
        let first = JsonFileStore::new(&path);
        first.set("a", "1".to_string()).await.unwrap();
        first.set("b", "2".to_string()).await.unwrap();

        let second = JsonFileStore::new(&path);
        assert_eq!(second.keys().await.unwrap(), vec!["a", "b"]);

        let raw = std::fs::read_to_string(&path).unwrap();
        let envelope: FileEnvelope = serde_json::from_str(&raw).unwrap();
        assert_eq!(envelope.metadata.format_version, FORMAT_VERSION);
        assert_eq!(envelope.metadata.instance_id, first.instance_id);
    }

    #[tokio::test]
    async fn test_remove() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("board.json"));
        store.set("a", "1".to_string()).await.unwrap();

        store.remove("a").await.unwrap();
        store.remove("never-set").await.unwrap();
        assert!(store.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_fails_reads_but_not_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("board.json");
        std::fs::write(&path, "not json").unwrap();
        let store = JsonFileStore::new(&path);

        assert!(matches!(
            store.get("a").await,
            Err(TaskboardError::Serialization(_))
        ));

        store.set("a", "1".to_string()).await.unwrap();
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_unsupported_version_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("board.json");
        let store = JsonFileStore::new(&path);
        store.set("a", "1".to_string()).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        value["version"] = serde_json::json!(99);
        std::fs::write(&path, value.to_string()).unwrap();

        assert!(store.get("a").await.is_err());
    }
}
