//! Blob store collaborator.
//!
//! Translations live in an object store as `"{prefix}{language}/{name}.json"`
//! blobs. The repository only needs list/get/put/copy/delete, expressed by
//! [`BlobStore`]. Two backends ship with the crate: an in-memory map and a
//! directory on disk that mirrors the bucket layout.
//!
//! ## Module Structure
//!
//! - `key`: object key encoding and parsing
//! - `memory`: `MemoryBlobStore`
//! - `fs`: `FsBlobStore`

mod fs;
pub mod key;
mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use fs::FsBlobStore;
pub use key::{normalize_prefix, object_key, parse_object_key};
pub use memory::MemoryBlobStore;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("object '{0}' not found")]
    NotFound(String),
    #[error("invalid object key '{0}'")]
    InvalidKey(String),
    #[error("I/O error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl BlobError {
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        BlobError::Io {
            key: key.into(),
            source,
        }
    }
}

/// The object-store operations the repository relies on.
///
/// Semantics follow S3: reading a missing key yields `None`, deleting a
/// missing key succeeds, concurrent writers of one key are last-write-wins.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// All keys starting with `prefix`, in a stable order.
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, BlobError>;

    async fn get_object(&self, key: &str) -> Result<Option<String>, BlobError>;

    async fn put_object(&self, key: &str, content: &str) -> Result<(), BlobError>;

    /// Fails with [`BlobError::NotFound`] if `source` does not exist.
    async fn copy_object(&self, source: &str, destination: &str) -> Result<(), BlobError>;

    async fn delete_object(&self, key: &str) -> Result<(), BlobError>;
}
