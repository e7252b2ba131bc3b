//! User-facing operations over one translation session.
//!
//! [`Dashboard`] composes the repository, the state store and an optional
//! translator. Every operation validates its input before touching the
//! store, and only mutates in-memory state after the store write succeeded.

use std::{fmt, sync::Arc};

use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::{
    core::{
        gaps::GapReport,
        json::{FieldInsert, format_json, insert_field, try_parse},
        state::TranslationStore,
        types::{LanguageFiles, SelectedTranslation, TranslationKey, TranslationSet},
    },
    repository::{RepositoryError, TranslationRepository},
    store::BlobError,
    translate::{TranslateError, TranslateOptions, TranslationRequest, Translator},
};

/// The three failure classes every surface reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    NotFound,
    Io,
    Validation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::NotFound => "not found",
            ErrorKind::Io => "I/O error",
            ErrorKind::Validation => "validation error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("translation '{0}' not found")]
    NotFound(TranslationKey),
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Repository(RepositoryError),
    #[error(transparent)]
    Translate(#[from] TranslateError),
}

impl DashboardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DashboardError::NotFound(_) => ErrorKind::NotFound,
            DashboardError::Validation(_) => ErrorKind::Validation,
            DashboardError::Repository(RepositoryError::NotFound(_)) => ErrorKind::NotFound,
            DashboardError::Repository(RepositoryError::Blob(BlobError::InvalidKey(_))) => {
                ErrorKind::Validation
            }
            DashboardError::Repository(_) => ErrorKind::Io,
            DashboardError::Translate(TranslateError::MissingCredentials) => ErrorKind::Validation,
            DashboardError::Translate(_) => ErrorKind::Io,
        }
    }

    fn validation(message: impl Into<String>) -> Self {
        DashboardError::Validation(message.into())
    }
}

impl From<RepositoryError> for DashboardError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(key) => DashboardError::NotFound(key),
            other => DashboardError::Repository(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

/// Language codes and file names become object key segments.
fn validate_segment(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DashboardError::validation(format!("{} must not be empty", what)));
    }
    if value.contains('/') || value.contains('\\') || value.contains("..") {
        return Err(DashboardError::validation(format!(
            "{} '{}' must not contain '/', '\\' or '..'",
            what, value
        )));
    }
    Ok(())
}

fn validate_key(language: &str, name: &str) -> Result<TranslationKey> {
    validate_segment("language", language)?;
    validate_segment("translation name", name)?;
    Ok(TranslationKey::new(language, name))
}

fn validate_field_path(field: &str) -> Result<()> {
    if field.is_empty() || field.split('.').any(str::is_empty) {
        return Err(DashboardError::validation(format!(
            "invalid field path '{}': segments must be non-empty",
            field
        )));
    }
    Ok(())
}

/// Stored translation content has to be a JSON object.
fn require_object(key: &TranslationKey, content: &str) -> Result<()> {
    match try_parse(content) {
        Ok(Value::Object(_)) => Ok(()),
        Ok(_) => Err(DashboardError::validation(format!(
            "content for '{}' must be a JSON object",
            key
        ))),
        Err(e) => Err(DashboardError::validation(format!(
            "content for '{}' is not valid JSON: {}",
            key, e
        ))),
    }
}

fn single_file(name: &str, content: String) -> LanguageFiles {
    LanguageFiles::from([(name.to_string(), content)])
}

pub struct Dashboard {
    repository: TranslationRepository,
    translator: Option<Arc<dyn Translator>>,
    state: TranslationStore,
}

impl Dashboard {
    /// A dashboard with an empty session. Call [`Dashboard::refresh`] to load.
    pub fn new(repository: TranslationRepository, translator: Option<Arc<dyn Translator>>) -> Self {
        Self {
            repository,
            translator,
            state: TranslationStore::default(),
        }
    }

    pub fn state(&self) -> &TranslationStore {
        &self.state
    }

    pub fn repository(&self) -> &TranslationRepository {
        &self.repository
    }

    pub fn can_generate(&self) -> bool {
        self.translator.is_some()
    }

    /// Reload the whole translation set from the store.
    ///
    /// On failure the previous session state is kept.
    pub async fn refresh(&mut self) -> Result<&TranslationSet> {
        let translations = self.repository.load_all().await?;
        self.state.replace_all(translations);
        Ok(self.state.translations())
    }

    pub fn list(&self) -> &TranslationSet {
        self.state.translations()
    }

    pub fn scan_gaps(&self) -> GapReport {
        self.state.gap_report()
    }

    /// Fetch one file from the store and mirror it into the session.
    pub async fn get(&mut self, language: &str, name: &str) -> Result<String> {
        let key = validate_key(language, name)?;
        let content = format_json(&self.repository.get(&key).await?);
        self.state
            .add_or_merge_files(language, single_file(name, content.clone()));
        Ok(content)
    }

    pub fn select(&mut self, language: &str, name: &str) -> Result<()> {
        let key = validate_key(language, name)?;
        if !self.state.contains(language, name) {
            return Err(DashboardError::NotFound(key));
        }
        self.state
            .set_selected(SelectedTranslation::new(language, name));
        Ok(())
    }

    /// Create a file with `content`, or `{}` when none is given.
    pub async fn create(
        &mut self,
        language: &str,
        name: &str,
        content: Option<&str>,
    ) -> Result<String> {
        let key = validate_key(language, name)?;
        let content = match content {
            Some(content) => {
                require_object(&key, content)?;
                format_json(content)
            }
            None => "{}".to_string(),
        };
        if self.state.contains(language, name) || self.repository.exists(&key).await? {
            return Err(DashboardError::validation(format!(
                "translation '{}' already exists",
                key
            )));
        }

        self.repository.put(&key, &content).await?;
        tracing::info!(%key, "Created translation");
        self.state
            .add_or_merge_files(language, single_file(name, content.clone()));
        Ok(content)
    }

    /// Deleting a file that does not exist succeeds.
    pub async fn delete(&mut self, language: &str, name: &str) -> Result<()> {
        let key = validate_key(language, name)?;
        self.repository.delete(&key).await?;
        tracing::info!(%key, "Deleted translation");
        self.state.delete_file(language, name);
        Ok(())
    }

    pub async fn rename(&mut self, language: &str, from: &str, to: &str) -> Result<()> {
        let source = validate_key(language, from)?;
        let destination = validate_key(language, to)?;
        if from == to {
            return Err(DashboardError::validation(format!(
                "'{}' is already named '{}'",
                source, to
            )));
        }
        if self.state.contains(language, to) || self.repository.exists(&destination).await? {
            return Err(DashboardError::validation(format!(
                "translation '{}' already exists",
                destination
            )));
        }

        self.repository.rename(language, from, to).await?;
        tracing::info!(from = %source, to = %destination, "Renamed translation");

        if self.state.rename_file(language, from, to).is_err() {
            // The session did not know the source; mirror what the store now holds.
            let content = self.repository.get(&destination).await?;
            self.state
                .add_or_merge_files(language, single_file(to, format_json(&content)));
        }
        Ok(())
    }

    /// Write every file of `translations`.
    ///
    /// The session only changes when every write succeeded. On a partial
    /// failure it is left as it was; [`Dashboard::refresh`] picks up whatever
    /// reached the store.
    pub async fn update_many(&mut self, translations: TranslationSet) -> Result<Vec<TranslationKey>> {
        for (language, files) in &translations {
            for name in files.keys() {
                validate_key(language, name)?;
            }
        }

        let written = self.repository.put_many(&translations).await.into_result()?;
        for (language, files) in translations {
            let files = files
                .into_iter()
                .map(|(name, content)| (name, format_json(&content)))
                .collect();
            self.state.add_or_merge_files(&language, files);
        }
        Ok(written)
    }

    /// Replace the content of the `slot` file with an uploaded file.
    ///
    /// `file_name` is the uploaded file's name; without its `.json` extension
    /// it has to match `slot`.
    pub async fn upload(
        &mut self,
        language: &str,
        slot: &str,
        file_name: &str,
        content: &str,
    ) -> Result<String> {
        let key = validate_key(language, slot)?;
        let stem = file_name.strip_suffix(".json").unwrap_or(file_name);
        if stem != slot {
            return Err(DashboardError::validation(format!(
                "Invalid translation name: expected '{}.json', got '{}'",
                slot, file_name
            )));
        }
        require_object(&key, content)?;

        let content = format_json(content);
        self.repository.put(&key, &content).await?;
        tracing::info!(%key, "Uploaded translation");
        self.state
            .add_or_merge_files(language, single_file(slot, content.clone()));
        Ok(content)
    }

    /// Add `field` (dot notation) to a file, persisting the result.
    ///
    /// A field that already exists is left alone and nothing is written.
    pub async fn add_field(
        &mut self,
        language: &str,
        name: &str,
        field: &str,
        default: Value,
    ) -> Result<FieldInsert> {
        let key = validate_key(language, name)?;
        validate_field_path(field)?;

        let current = self.state.get(language, name).unwrap_or("{}");
        let (content, action) = insert_field(current, field, default.clone());
        match action {
            FieldInsert::Conflict => {
                return Err(DashboardError::validation(format!(
                    "cannot add '{}' to '{}': a parent segment is not an object",
                    field, key
                )));
            }
            FieldInsert::AlreadyPresent => return Ok(action),
            FieldInsert::Added => {}
        }

        self.repository.put(&key, &content).await?;
        Ok(self.state.add_field(language, name, field, default))
    }

    /// Translate `source_language/name` into `target_language` and store the result.
    pub async fn generate(
        &mut self,
        source_language: &str,
        name: &str,
        target_language: &str,
        options: TranslateOptions,
    ) -> Result<String> {
        let Some(translator) = self.translator.clone() else {
            return Err(TranslateError::MissingCredentials.into());
        };
        let source = validate_key(source_language, name)?;
        let target = validate_key(target_language, name)?;
        if source_language == target_language {
            return Err(DashboardError::validation(
                "source and target language must differ",
            ));
        }
        if self.state.contains(target_language, name) || self.repository.exists(&target).await? {
            return Err(DashboardError::validation(format!(
                "translation '{}' already exists",
                target
            )));
        }

        let source_content = self.repository.get(&source).await?;
        let document = match try_parse(&source_content) {
            Ok(document @ Value::Object(_)) => document,
            _ => {
                return Err(DashboardError::validation(format!(
                    "'{}' is not a JSON object and cannot be translated",
                    source
                )));
            }
        };

        let request = TranslationRequest {
            old_language: source_language.to_string(),
            new_language: target_language.to_string(),
            translation: document,
            options,
        };
        let translated = translator.translate(&request).await?;
        let content = serde_json::to_string_pretty(&translated)
            .map_err(|e| TranslateError::InvalidDocument(e.to_string()))?;

        self.repository.put(&target, &content).await?;
        tracing::info!(from = %source, to = %target, "Stored generated translation");
        self.state
            .add_or_merge_files(target_language, single_file(name, content.clone()));
        Ok(content)
    }
}
