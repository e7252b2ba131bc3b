use std::collections::{HashMap, HashSet};

use serde_json::Value;

use super::types::{FieldGaps, GapReport, MissingFields, MissingTranslations};
use crate::core::{json::FlatDocument, types::TranslationSet};

/// Compute both gap maps of `translations`.
pub fn analyze(translations: &TranslationSet) -> GapReport {
    GapReport {
        missing_translations: missing_translations(translations),
        missing_fields: missing_fields(translations),
    }
}

/// For every language, the translation files present elsewhere but not in it.
///
/// Names are listed in order of first appearance while iterating languages
/// and their files.
pub fn missing_translations(translations: &TranslationSet) -> MissingTranslations {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut union: Vec<&str> = Vec::new();
    for files in translations.values() {
        for name in files.keys() {
            if seen.insert(name.as_str()) {
                union.push(name.as_str());
            }
        }
    }

    translations
        .iter()
        .map(|(language, files)| {
            let missing = union
                .iter()
                .filter(|name| !files.contains_key(**name))
                .map(|name| name.to_string())
                .collect();
            (language.clone(), missing)
        })
        .collect()
}

/// Translation file names present in every language.
pub fn common_files(translations: &TranslationSet) -> Vec<String> {
    let mut languages = translations.values();
    let Some(first) = languages.next() else {
        return Vec::new();
    };

    let mut common: Vec<&String> = first.keys().collect();
    for files in languages {
        common.retain(|name| files.contains_key(*name));
    }
    common.into_iter().cloned().collect()
}

/// Field-level gaps for the files common to all languages.
///
/// Every ordered pair of distinct languages `(source, other)` is compared:
/// each flattened key of `source` is reported under `other` as `missing` when
/// `other` lacks it, or as `empty` when `other` holds `""` there. With three or
/// more languages a key is therefore reported once per language that has it.
/// A language's own empty values are only seen through other languages' keys.
pub fn missing_fields(translations: &TranslationSet) -> MissingFields {
    let common = common_files(translations);

    let mut result: MissingFields = translations
        .keys()
        .map(|language| {
            let files = common
                .iter()
                .map(|name| (name.clone(), FieldGaps::default()))
                .collect();
            (language.clone(), files)
        })
        .collect();

    // Each document is flattened once and reused for every pair.
    let mut flattened: HashMap<(&str, &str), FlatDocument> = HashMap::new();
    for (language, files) in translations {
        for name in &common {
            let content = files.get(name).map(String::as_str).unwrap_or("{}");
            flattened.insert((language.as_str(), name.as_str()), FlatDocument::parse(content));
        }
    }

    for language in translations.keys() {
        for name in &common {
            let Some(source) = flattened.get(&(language.as_str(), name.as_str())) else {
                continue;
            };

            for other in translations.keys().filter(|other| *other != language) {
                let Some(target) = flattened.get(&(other.as_str(), name.as_str())) else {
                    continue;
                };
                let Some(gaps) = result.get_mut(other).and_then(|files| files.get_mut(name))
                else {
                    continue;
                };
                compare_documents(source, target, gaps);
            }
        }
    }

    result
}

fn compare_documents(source: &FlatDocument, target: &FlatDocument, gaps: &mut FieldGaps) {
    for key in source.keys() {
        match target.get(key) {
            None => gaps.missing.push(key.to_string()),
            Some(Value::String(value)) if value.is_empty() => gaps.empty.push(key.to_string()),
            Some(_) => {}
        }
    }
}
