use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BlobError, BlobStore};

/// Blob store kept in memory. Keys list in lexical order.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: RwLock<BTreeMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_objects<I, K, V>(objects: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let objects = objects
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            objects: RwLock::new(objects),
        }
    }

    /// Snapshot of every stored object.
    pub async fn objects(&self) -> BTreeMap<String, String> {
        self.objects.read().await.clone()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, BlobError> {
        let objects = self.objects.read().await;
        Ok(objects
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn get_object(&self, key: &str) -> Result<Option<String>, BlobError> {
        Ok(self.objects.read().await.get(key).cloned())
    }

    async fn put_object(&self, key: &str, content: &str) -> Result<(), BlobError> {
        self.objects
            .write()
            .await
            .insert(key.to_string(), content.to_string());
        Ok(())
    }

    async fn copy_object(&self, source: &str, destination: &str) -> Result<(), BlobError> {
        let mut objects = self.objects.write().await;
        let content = objects
            .get(source)
            .cloned()
            .ok_or_else(|| BlobError::NotFound(source.to_string()))?;
        objects.insert(destination.to_string(), content);
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<(), BlobError> {
        self.objects.write().await.remove(key);
        Ok(())
    }
}
