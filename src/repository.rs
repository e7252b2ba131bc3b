//! Translation repository: bulk load and persistence against a [`BlobStore`].
//!
//! Bulk operations fan out one blob operation per translation file, with a
//! semaphore capping how many are in flight. Results are merged into ordered
//! maps, so the outcome never depends on completion order. Nothing is retried.

use std::sync::Arc;

use futures::future::join_all;
use thiserror::Error;
use tokio::sync::Semaphore;

use crate::{
    core::{
        json::format_json,
        types::{TranslationKey, TranslationSet},
    },
    store::{BlobError, BlobStore, normalize_prefix, object_key, parse_object_key},
};

pub const DEFAULT_CONCURRENCY: usize = 10;

/// Largest limit a semaphore can hold.
pub const MAX_CONCURRENCY: usize = Semaphore::MAX_PERMITS;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("translation '{0}' not found")]
    NotFound(TranslationKey),
    #[error(transparent)]
    Blob(#[from] BlobError),
    #[error("{} of {attempted} translation writes failed: {}", .failed.len(), join_keys(.failed))]
    PartialWrite {
        attempted: usize,
        failed: Vec<TranslationKey>,
    },
}

fn join_keys(keys: &[TranslationKey]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn limiter_closed(object_key: &str) -> BlobError {
    BlobError::io(object_key, std::io::Error::other("concurrency limiter closed"))
}

/// Per-file outcome of [`TranslationRepository::put_many`], sorted by key.
#[derive(Debug, Default)]
pub struct BulkWriteReport {
    pub written: Vec<TranslationKey>,
    pub failed: Vec<(TranslationKey, BlobError)>,
}

impl BulkWriteReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.written.len() + self.failed.len()
    }

    /// Turn an incomplete report into [`RepositoryError::PartialWrite`].
    pub fn into_result(self) -> Result<Vec<TranslationKey>, RepositoryError> {
        if self.is_complete() {
            return Ok(self.written);
        }
        Err(RepositoryError::PartialWrite {
            attempted: self.attempted(),
            failed: self.failed.into_iter().map(|(key, _)| key).collect(),
        })
    }
}

pub struct TranslationRepository {
    store: Arc<dyn BlobStore>,
    prefix: String,
    download_limit: Arc<Semaphore>,
    upload_limit: Arc<Semaphore>,
}

impl TranslationRepository {
    pub fn new(store: Arc<dyn BlobStore>, prefix: &str) -> Self {
        Self::with_concurrency(store, prefix, DEFAULT_CONCURRENCY, DEFAULT_CONCURRENCY)
    }

    /// Limits are clamped to `1..=MAX_CONCURRENCY`.
    pub fn with_concurrency(
        store: Arc<dyn BlobStore>,
        prefix: &str,
        download_concurrency: usize,
        upload_concurrency: usize,
    ) -> Self {
        Self {
            store,
            prefix: normalize_prefix(prefix),
            download_limit: Arc::new(Semaphore::new(
                download_concurrency.clamp(1, MAX_CONCURRENCY),
            )),
            upload_limit: Arc::new(Semaphore::new(upload_concurrency.clamp(1, MAX_CONCURRENCY))),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn key_of(&self, key: &TranslationKey) -> String {
        object_key(&self.prefix, key)
    }

    /// Load every translation under the prefix.
    ///
    /// Keys that are not `{language}/{name}.json` and blobs that are empty or
    /// vanished between list and get are skipped. Any other failure aborts
    /// the load; a partially assembled set is never returned.
    pub async fn load_all(&self) -> Result<TranslationSet, RepositoryError> {
        let object_keys = self.store.list_keys(&self.prefix).await?;
        tracing::debug!(count = object_keys.len(), prefix = %self.prefix, "Listed translation blobs");

        let mut wanted = Vec::with_capacity(object_keys.len());
        for object_key in object_keys {
            match parse_object_key(&self.prefix, &object_key) {
                Some(key) => wanted.push((object_key, key)),
                None => tracing::debug!(%object_key, "Skipping blob outside translation layout"),
            }
        }

        let fetches = wanted.into_iter().map(|(object_key, key)| async move {
            let _permit = self
                .download_limit
                .acquire()
                .await
                .map_err(|_| limiter_closed(&object_key))?;
            let content = self.store.get_object(&object_key).await?;
            Ok::<_, RepositoryError>((key, content))
        });

        let mut translations = TranslationSet::new();
        for result in join_all(fetches).await {
            let (key, content) = result?;
            match content {
                Some(content) if !content.is_empty() => {
                    translations
                        .entry(key.language)
                        .or_default()
                        .insert(key.name, format_json(&content));
                }
                _ => tracing::debug!(%key, "Skipping empty translation blob"),
            }
        }

        tracing::info!(
            languages = translations.len(),
            files = translations.values().map(|f| f.len()).sum::<usize>(),
            "Loaded translations"
        );
        Ok(translations)
    }

    pub async fn get(&self, key: &TranslationKey) -> Result<String, RepositoryError> {
        match self.store.get_object(&self.key_of(key)).await? {
            Some(content) => Ok(content),
            None => Err(RepositoryError::NotFound(key.clone())),
        }
    }

    pub async fn exists(&self, key: &TranslationKey) -> Result<bool, RepositoryError> {
        Ok(self.store.get_object(&self.key_of(key)).await?.is_some())
    }

    pub async fn put(&self, key: &TranslationKey, content: &str) -> Result<(), RepositoryError> {
        self.store.put_object(&self.key_of(key), content).await?;
        Ok(())
    }

    /// Deleting a translation that does not exist succeeds.
    pub async fn delete(&self, key: &TranslationKey) -> Result<(), RepositoryError> {
        self.store.delete_object(&self.key_of(key)).await?;
        Ok(())
    }

    /// Copy `language/from` to `language/to`, then delete the source.
    pub async fn rename(&self, language: &str, from: &str, to: &str) -> Result<(), RepositoryError> {
        let source = TranslationKey::new(language, from);
        let destination = TranslationKey::new(language, to);
        match self
            .store
            .copy_object(&self.key_of(&source), &self.key_of(&destination))
            .await
        {
            Ok(()) => {}
            Err(BlobError::NotFound(_)) => return Err(RepositoryError::NotFound(source)),
            Err(e) => return Err(e.into()),
        }
        self.store.delete_object(&self.key_of(&source)).await?;
        Ok(())
    }

    /// Write every file of `translations`, one blob per file.
    ///
    /// Failures are collected per file instead of aborting the batch; check
    /// [`BulkWriteReport::is_complete`] or call [`BulkWriteReport::into_result`].
    pub async fn put_many(&self, translations: &TranslationSet) -> BulkWriteReport {
        let writes = translations.iter().flat_map(|(language, files)| {
            files.iter().map(move |(name, content)| {
                let key = TranslationKey::new(language.as_str(), name.as_str());
                async move {
                    let outcome = match self.upload_limit.acquire().await {
                        Ok(_permit) => {
                            self.store
                                .put_object(&self.key_of(&key), &format_json(content))
                                .await
                        }
                        Err(_) => Err(limiter_closed(&self.key_of(&key))),
                    };
                    (key, outcome)
                }
            })
        });

        let mut report = BulkWriteReport::default();
        for (key, outcome) in join_all(writes).await {
            match outcome {
                Ok(()) => report.written.push(key),
                Err(e) => {
                    tracing::warn!(%key, error = %e, "Failed to write translation");
                    report.failed.push((key, e));
                }
            }
        }
        report.written.sort();
        report.failed.sort_by(|a, b| a.0.cmp(&b.0));
        report
    }
}
