use std::{collections::BTreeMap, fmt};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Translation file name (without `.json`) -> raw JSON text, for one language.
///
/// The text is kept verbatim: it may be syntactically invalid while a user is
/// editing it, and every consumer has to tolerate that.
pub type LanguageFiles = BTreeMap<String, String>;

/// Language code -> translation files of that language.
pub type TranslationSet = BTreeMap<String, LanguageFiles>;

/// Identifies one translation file of one language.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct TranslationKey {
    pub language: String,
    pub name: String,
}

impl TranslationKey {
    pub fn new(language: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TranslationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.language, self.name)
    }
}

/// The `(language, translation)` pair currently open in the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectedTranslation {
    pub language: String,
    pub translation: String,
}

impl SelectedTranslation {
    pub fn new(language: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            translation: translation.into(),
        }
    }
}
