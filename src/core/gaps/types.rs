use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Language -> translation files that exist in some other language but not in this one.
pub type MissingTranslations = BTreeMap<String, Vec<String>>;

/// Language -> translation file -> field gaps, over the files common to all languages.
pub type MissingFields = BTreeMap<String, BTreeMap<String, FieldGaps>>;

/// Field-level gaps of one translation file in one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldGaps {
    /// Flattened keys found in another language but absent here.
    pub missing: Vec<String>,
    /// Flattened keys present here with an empty string value.
    pub empty: Vec<String>,
}

impl FieldGaps {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.empty.is_empty()
    }
}

/// Both derived gap maps of a translation set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GapReport {
    pub missing_translations: MissingTranslations,
    pub missing_fields: MissingFields,
}

/// Counts over a [`GapReport`], for overviews.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GapSummary {
    pub missing_translation_count: usize,
    pub missing_field_count: usize,
    pub empty_field_count: usize,
    /// Languages with at least one gap, sorted.
    pub affected_languages: Vec<String>,
}

impl GapReport {
    pub fn has_gaps(&self) -> bool {
        self.missing_translations.values().any(|names| !names.is_empty())
            || self
                .missing_fields
                .values()
                .flat_map(|files| files.values())
                .any(|gaps| !gaps.is_empty())
    }

    pub fn summary(&self) -> GapSummary {
        let mut summary = GapSummary::default();
        let mut affected = std::collections::BTreeSet::new();

        for (language, names) in &self.missing_translations {
            if !names.is_empty() {
                summary.missing_translation_count += names.len();
                affected.insert(language.clone());
            }
        }
        for (language, files) in &self.missing_fields {
            for gaps in files.values() {
                summary.missing_field_count += gaps.missing.len();
                summary.empty_field_count += gaps.empty.len();
                if !gaps.is_empty() {
                    affected.insert(language.clone());
                }
            }
        }

        summary.affected_languages = affected.into_iter().collect();
        summary
    }
}
