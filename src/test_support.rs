//! Test doubles shared by the unit tests of the repository and use cases.

use crate::adapters::JsonCustomerRepository;
use crate::domain::model::ImageUpload;
use crate::domain::ports::DocumentStore;
use crate::utils::error::{CrmError, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// 1x1 transparent PNG.
pub const PNG_1X1: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

#[derive(Clone, Default)]
pub struct MockStorage {
    documents: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<Mutex<usize>>,
}

impl MockStorage {
    pub async fn put_raw(&self, key: &str, json: serde_json::Value) {
        let mut documents = self.documents.lock().await;
        documents.insert(key.to_string(), json.to_string());
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.documents.lock().await.get(key).cloned()
    }

    pub async fn write_count(&self) -> usize {
        *self.writes.lock().await
    }
}

impl DocumentStore for MockStorage {
    async fn read<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>> {
        let documents = self.documents.lock().await;
        match documents.get(key) {
            Some(json) => serde_json::from_str(json)
                .map(Some)
                .map_err(|e| CrmError::storage(key, e)),
            None => Ok(None),
        }
    }

    async fn write<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value).map_err(|e| CrmError::storage(key, e))?;
        self.documents.lock().await.insert(key.to_string(), json);
        *self.writes.lock().await += 1;
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.documents.lock().await.contains_key(key))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.documents.lock().await.remove(key);
        Ok(())
    }
}

/// Storage whose every operation fails with an I/O error.
#[derive(Clone, Default)]
pub struct BrokenStorage;

impl BrokenStorage {
    fn failure(key: &str) -> CrmError {
        CrmError::storage(
            key,
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "disk unavailable"),
        )
    }
}

impl DocumentStore for BrokenStorage {
    async fn read<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>> {
        Err(Self::failure(key))
    }

    async fn write<T: Serialize + Sync>(&self, key: &str, _value: &T) -> Result<()> {
        Err(Self::failure(key))
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Err(Self::failure(key))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        Err(Self::failure(key))
    }
}

pub fn memory_repository() -> (Arc<JsonCustomerRepository<MockStorage>>, MockStorage) {
    let storage = MockStorage::default();
    (Arc::new(JsonCustomerRepository::new(storage.clone())), storage)
}

pub fn broken_repository() -> Arc<JsonCustomerRepository<BrokenStorage>> {
    Arc::new(JsonCustomerRepository::new(BrokenStorage))
}

pub fn png_upload(file_name: &str) -> ImageUpload {
    ImageUpload {
        base64_data: PNG_1X1.to_string(),
        file_name: file_name.to_string(),
        content_type: "image/png".to_string(),
        size_in_bytes: 70,
    }
}
