use crate::domain::ports::{ConfigProvider, DocumentStore};
use crate::utils::error::{CrmError, Result};
use crate::utils::validation::validate_storage_key;
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::{Mutex, OnceCell};

/// Serializes every file operation of every [`JsonStorage`] in the process.
/// Held for one read or write only, never across a read-modify-write cycle.
static STORAGE_LOCK: Mutex<()> = Mutex::const_new(());

/// JSON documents stored as `<root>/<key>.json`.
#[derive(Debug)]
pub struct JsonStorage {
    root: PathBuf,
    root_ready: OnceCell<()>,
}

impl JsonStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            root_ready: OnceCell::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.data_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_storage_key("key", key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }

    async fn ensure_root(&self, key: &str) -> Result<()> {
        self.root_ready
            .get_or_try_init(|| async {
                fs::create_dir_all(&self.root).await?;
                tracing::debug!("Storage root ready at {}", self.root.display());
                Ok::<(), std::io::Error>(())
            })
            .await
            .map_err(|e| CrmError::storage(key, e))?;
        Ok(())
    }
}

impl DocumentStore for JsonStorage {
    async fn read<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>> {
        let path = self.path_for(key)?;
        let _guard = STORAGE_LOCK.lock().await;
        self.ensure_root(key).await?;

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Document '{}' does not exist yet", key);
                return Ok(None);
            }
            Err(e) => return Err(CrmError::storage(key, e)),
        };

        if content.trim().is_empty() {
            tracing::debug!("Document '{}' is empty", key);
            return Ok(None);
        }

        let value = serde_json::from_str(&content).map_err(|e| CrmError::storage(key, e))?;
        tracing::debug!("Read document '{}' ({} bytes)", key, content.len());
        Ok(Some(value))
    }

    async fn write<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.path_for(key)?;
        let data = serde_json::to_vec_pretty(value).map_err(|e| CrmError::storage(key, e))?;

        let _guard = STORAGE_LOCK.lock().await;
        self.ensure_root(key).await?;
        fs::write(&path, &data)
            .await
            .map_err(|e| CrmError::storage(key, e))?;

        tracing::debug!("Wrote document '{}' ({} bytes)", key, data.len());
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        let _guard = STORAGE_LOCK.lock().await;
        self.ensure_root(key).await?;
        fs::try_exists(&path)
            .await
            .map_err(|e| CrmError::storage(key, e))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let _guard = STORAGE_LOCK.lock().await;
        self.ensure_root(key).await?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!("Deleted document '{}'", key);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CrmError::storage(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Customer, CustomerDataset, CustomerImage};
    use crate::utils::error::StorageFailure;
    use chrono::Utc;
    use serde::Deserialize;
    use std::sync::Arc;
    use tempfile::TempDir;
    use uuid::Uuid;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        title: String,
        pages: u32,
    }

    #[tokio::test]
    async fn test_read_missing_document_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(temp_dir.path());

        let note: Option<Note> = storage.read("notes").await.unwrap();
        assert!(note.is_none());
    }

    #[tokio::test]
    async fn test_read_whitespace_document_is_none() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("notes.json"), "  \n").unwrap();
        let storage = JsonStorage::new(temp_dir.path());

        let note: Option<Note> = storage.read("notes").await.unwrap();
        assert!(note.is_none());
    }

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(temp_dir.path());
        let note = Note {
            title: "hello".to_string(),
            pages: 3,
        };

        storage.write("notes", &note).await.unwrap();
        let loaded: Option<Note> = storage.read("notes").await.unwrap();

        assert_eq!(loaded, Some(note));
        let raw = std::fs::read_to_string(temp_dir.path().join("notes.json")).unwrap();
        assert!(raw.contains("\n  \"title\": \"hello\""), "expected indented JSON: {}", raw);
    }

    #[tokio::test]
    async fn test_customer_dataset_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(temp_dir.path());

        let mut jane = Customer::new("Jane Doe", "jane@x.com");
        jane.id = Uuid::new_v4();
        jane.phone_number = Some("555-0100".to_string());
        jane.address = Some("1 Main St".to_string());
        for name in ["a.jpg", "b.png"] {
            jane.images.push(CustomerImage {
                id: Uuid::new_v4(),
                customer_id: jane.id,
                base64_data: "aGVsbG8=".to_string(),
                file_name: name.to_string(),
                content_type: "image/jpeg".to_string(),
                size_in_bytes: 5,
                uploaded_at: Utc::now(),
            });
        }
        let mut john = Customer::new("John Roe", "john@x.com");
        john.id = Uuid::new_v4();
        let dataset = CustomerDataset {
            customers: vec![jane, john],
        };

        storage.write("customers", &dataset).await.unwrap();
        let loaded: Option<CustomerDataset> = storage.read("customers").await.unwrap();

        assert_eq!(loaded, Some(dataset));
    }

    #[tokio::test]
    async fn test_corrupted_document_reports_key() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("notes.json"), "{ not json").unwrap();
        let storage = JsonStorage::new(temp_dir.path());

        let err = storage.read::<Note>("notes").await.unwrap_err();
        match err {
            CrmError::Storage { key, source } => {
                assert_eq!(key, "notes");
                assert!(matches!(source, StorageFailure::Json(_)));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_root_directory_created_lazily() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("nested").join("data");
        let storage = JsonStorage::new(&root);
        assert!(!root.exists());

        assert!(!storage.exists("notes").await.unwrap());
        assert!(root.is_dir());
    }

    #[tokio::test]
    async fn test_exists_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(temp_dir.path());
        let note = Note {
            title: "bye".to_string(),
            pages: 1,
        };

        storage.write("notes", &note).await.unwrap();
        assert!(storage.exists("notes").await.unwrap());

        storage.delete("notes").await.unwrap();
        assert!(!storage.exists("notes").await.unwrap());

        // deleting twice is not an error
        storage.delete("notes").await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_keys_outside_root() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(temp_dir.path());

        let err = storage.read::<Note>("../escape").await.unwrap_err();
        assert!(matches!(err, CrmError::InvalidArgument { .. }));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writes_to_many_keys() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Arc::new(JsonStorage::new(temp_dir.path()));

        let mut handles = Vec::new();
        for i in 0..16u32 {
            let storage = Arc::clone(&storage);
            handles.push(tokio::spawn(async move {
                let note = Note {
                    title: format!("note-{}", i),
                    pages: i,
                };
                storage.write(&format!("note-{}", i), &note).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        for i in 0..16u32 {
            let note: Note = storage.read(&format!("note-{}", i)).await.unwrap().unwrap();
            assert_eq!(note.pages, i);
        }
    }
}
