//! In-memory translation state for one session.
//!
//! [`TranslationStore`] owns the translation set and the two derived gap maps.
//! Every transition recomputes the derived maps before returning, so a reader
//! never sees them out of sync with the set.

use serde_json::Value;
use thiserror::Error;

use crate::core::{
    gaps::{self, FieldGaps, GapReport, MissingFields, MissingTranslations},
    json::{FieldInsert, insert_field},
    types::{LanguageFiles, SelectedTranslation, TranslationSet},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("translation '{language}/{translation}' does not exist")]
    UnknownTranslation {
        language: String,
        translation: String,
    },
    #[error("translation '{language}/{translation}' already exists")]
    AlreadyExists {
        language: String,
        translation: String,
    },
}

/// A state transition, for callers that prefer dispatching values.
#[derive(Debug, Clone)]
pub enum Action {
    ReplaceAll(TranslationSet),
    AddOrMergeFile {
        language: String,
        files: LanguageFiles,
    },
    AddField {
        language: String,
        translation: String,
        field: String,
        default: Value,
    },
    DeleteFile {
        language: String,
        translation: String,
    },
    RenameFile {
        language: String,
        from: String,
        to: String,
    },
    SetSelected(SelectedTranslation),
}

#[derive(Debug, Clone, Default)]
pub struct TranslationStore {
    translations: TranslationSet,
    missing_translations: MissingTranslations,
    missing_fields: MissingFields,
    selected: Option<SelectedTranslation>,
}

impl TranslationStore {
    pub fn new(translations: TranslationSet) -> Self {
        let mut store = Self::default();
        store.replace_all(translations);
        store
    }

    pub fn translations(&self) -> &TranslationSet {
        &self.translations
    }

    pub fn languages(&self) -> Vec<&str> {
        self.translations.keys().map(String::as_str).collect()
    }

    pub fn get(&self, language: &str, translation: &str) -> Option<&str> {
        self.translations
            .get(language)
            .and_then(|files| files.get(translation))
            .map(String::as_str)
    }

    pub fn contains(&self, language: &str, translation: &str) -> bool {
        self.get(language, translation).is_some()
    }

    pub fn missing_translations(&self) -> &MissingTranslations {
        &self.missing_translations
    }

    pub fn missing_fields(&self) -> &MissingFields {
        &self.missing_fields
    }

    pub fn field_gaps(&self, language: &str, translation: &str) -> Option<&FieldGaps> {
        self.missing_fields
            .get(language)
            .and_then(|files| files.get(translation))
    }

    pub fn gap_report(&self) -> GapReport {
        GapReport {
            missing_translations: self.missing_translations.clone(),
            missing_fields: self.missing_fields.clone(),
        }
    }

    pub fn selected(&self) -> Option<&SelectedTranslation> {
        self.selected.as_ref()
    }

    pub fn apply(&mut self, action: Action) -> Result<(), StateError> {
        match action {
            Action::ReplaceAll(translations) => self.replace_all(translations),
            Action::AddOrMergeFile { language, files } => self.add_or_merge_files(&language, files),
            Action::AddField {
                language,
                translation,
                field,
                default,
            } => {
                self.add_field(&language, &translation, &field, default);
            }
            Action::DeleteFile {
                language,
                translation,
            } => {
                self.delete_file(&language, &translation);
            }
            Action::RenameFile { language, from, to } => self.rename_file(&language, &from, &to)?,
            Action::SetSelected(selected) => self.set_selected(selected),
        }
        Ok(())
    }

    pub fn replace_all(&mut self, translations: TranslationSet) {
        self.translations = translations;
        self.recompute_all();
    }

    /// Merge `files` into the bucket of `language`, creating it if needed.
    /// Existing content under the same name is overwritten.
    pub fn add_or_merge_files(&mut self, language: &str, files: LanguageFiles) {
        self.translations
            .entry(language.to_string())
            .or_default()
            .extend(files);
        self.recompute_all();
    }

    /// Add `field` (dot notation) with `default` unless it is already present.
    ///
    /// A field-level edit leaves the file set untouched, so only the
    /// missing-fields map is recomputed, unless the file had to be created.
    pub fn add_field(
        &mut self,
        language: &str,
        translation: &str,
        field: &str,
        default: Value,
    ) -> FieldInsert {
        let files = self.translations.entry(language.to_string()).or_default();
        let created = !files.contains_key(translation);
        let current = files.get(translation).map(String::as_str).unwrap_or("{}");

        let (content, action) = insert_field(current, field, default);
        if action != FieldInsert::Added {
            if files.is_empty() {
                self.translations.remove(language);
            }
            return action;
        }
        files.insert(translation.to_string(), content);

        if created {
            self.recompute_all();
        } else {
            self.missing_fields = gaps::missing_fields(&self.translations);
        }
        action
    }

    /// Remove a file. A language left without files disappears, as it would on reload.
    pub fn delete_file(&mut self, language: &str, translation: &str) -> bool {
        let Some(files) = self.translations.get_mut(language) else {
            return false;
        };
        let removed = files.remove(translation).is_some();
        if files.is_empty() {
            self.translations.remove(language);
        }

        if removed {
            if self
                .selected
                .as_ref()
                .is_some_and(|s| s.language == language && s.translation == translation)
            {
                self.selected = None;
            }
            self.recompute_all();
        }
        removed
    }

    /// Move the content of `from` to `to` within `language`. No store I/O.
    pub fn rename_file(&mut self, language: &str, from: &str, to: &str) -> Result<(), StateError> {
        let Some(files) = self.translations.get_mut(language) else {
            return Err(StateError::UnknownTranslation {
                language: language.to_string(),
                translation: from.to_string(),
            });
        };
        if from == to {
            return if files.contains_key(from) {
                Ok(())
            } else {
                Err(StateError::UnknownTranslation {
                    language: language.to_string(),
                    translation: from.to_string(),
                })
            };
        }
        if files.contains_key(to) {
            return Err(StateError::AlreadyExists {
                language: language.to_string(),
                translation: to.to_string(),
            });
        }
        let Some(content) = files.remove(from) else {
            return Err(StateError::UnknownTranslation {
                language: language.to_string(),
                translation: from.to_string(),
            });
        };
        files.insert(to.to_string(), content);

        if let Some(selected) = self.selected.as_mut()
            && selected.language == language
            && selected.translation == from
        {
            selected.translation = to.to_string();
        }
        self.recompute_all();
        Ok(())
    }

    pub fn set_selected(&mut self, selected: SelectedTranslation) {
        self.selected = Some(selected);
    }

    fn recompute_all(&mut self) {
        let report = gaps::analyze(&self.translations);
        self.missing_translations = report.missing_translations;
        self.missing_fields = report.missing_fields;
    }
}
