use std::{
    io,
    path::{Component, Path, PathBuf},
};

use async_trait::async_trait;
use walkdir::WalkDir;

use super::{BlobError, BlobStore};

/// Blob store backed by a directory: object key `a/b.json` is the file
/// `<root>/a/b.json`.
///
/// A root that does not exist lists as empty, so an unconfigured store
/// degrades to an empty translation set.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, BlobError> {
        let relative = Path::new(key);
        let is_plain = !key.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !is_plain {
            return Err(BlobError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

fn list_files(root: &Path, prefix: &str) -> io::Result<Vec<String>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut keys = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(io::Error::other)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let key = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if key.starts_with(prefix) {
            keys.push(key);
        }
    }
    Ok(keys)
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, BlobError> {
        let root = self.root.clone();
        let owned_prefix = prefix.to_string();
        let listed = tokio::task::spawn_blocking(move || list_files(&root, &owned_prefix))
            .await
            .map_err(|e| BlobError::io(prefix, io::Error::other(e)))?;
        listed.map_err(|e| BlobError::io(prefix, e))
    }

    async fn get_object(&self, key: &str) -> Result<Option<String>, BlobError> {
        let path = self.resolve(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BlobError::io(key, e)),
        }
    }

    async fn put_object(&self, key: &str, content: &str) -> Result<(), BlobError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| BlobError::io(key, e))?;
        }
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| BlobError::io(key, e))
    }

    async fn copy_object(&self, source: &str, destination: &str) -> Result<(), BlobError> {
        let from = self.resolve(source)?;
        let to = self.resolve(destination)?;
        if let Some(parent) = to.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| BlobError::io(destination, e))?;
        }
        match tokio::fs::copy(&from, &to).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(BlobError::NotFound(source.to_string()))
            }
            Err(e) => Err(BlobError::io(source, e)),
        }
    }

    async fn delete_object(&self, key: &str) -> Result<(), BlobError> {
        let path = self.resolve(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BlobError::io(key, e)),
        }
    }
}
