//! Object key layout: `"{prefix}{language}/{name}.json"`.

use crate::core::types::TranslationKey;

const EXTENSION: &str = ".json";

/// A non-empty prefix always ends with exactly one `/`.
///
/// - `""` -> `""`
/// - `"translations"` -> `"translations/"`
/// - `"app/i18n/"` -> `"app/i18n/"`
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}/", trimmed)
    }
}

/// Object key of a translation file. `prefix` must already be normalized.
pub fn object_key(prefix: &str, key: &TranslationKey) -> String {
    format!("{}{}/{}{}", prefix, key.language, key.name, EXTENSION)
}

/// Split an object key back into language and name.
///
/// Returns `None` for keys outside `prefix`, keys without exactly one `/`
/// after the prefix, and keys not ending in `.json` with a non-empty stem.
pub fn parse_object_key(prefix: &str, object_key: &str) -> Option<TranslationKey> {
    let rest = object_key.strip_prefix(prefix)?;
    let (language, file_name) = rest.split_once('/')?;
    if language.is_empty() || file_name.contains('/') {
        return None;
    }
    let name = file_name.strip_suffix(EXTENSION)?;
    if name.is_empty() {
        return None;
    }
    Some(TranslationKey::new(language, name))
}
