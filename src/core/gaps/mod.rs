//! Gap analysis across languages.
//!
//! Finds translation files missing from a language entirely, and, for files
//! every language has, the flattened keys that are missing or empty.
//!
//! The analysis is a pure function of the translation set. Malformed JSON
//! never fails it: such a document has no keys, so it is reported as missing
//! every key its siblings have and contributes nothing to their diffs.

mod analyzer;
mod types;

pub use analyzer::{analyze, common_files, missing_fields, missing_translations};
pub use types::{FieldGaps, GapReport, GapSummary, MissingFields, MissingTranslations};
