use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{
    gaps::{GapSummary, MissingFields, MissingTranslations},
    types::TranslationKey,
};

// ============================================================
// Config Types (get_config)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Project directory; the config file is searched from here upwards
    pub project_root_path: String,
}

/// Configuration DTO for MCP
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub config: ConfigValues,
}

/// Effective configuration. Credentials are reported, never echoed.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub store_root: String,
    /// `storeRoot` resolved against the config file's directory
    pub store_root_path: String,
    pub prefix: String,
    pub download_concurrency: usize,
    pub upload_concurrency: usize,
    pub ai_configured: bool,
    pub model: String,
}

// ============================================================
// Listing Types (list_translations, get_translation)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListTranslationsParams {
    pub project_root_path: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationsResult {
    pub languages: Vec<LanguageInfo>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguageInfo {
    pub language: String,
    pub files: Vec<FileInfo>,
    /// Files other languages have but this one lacks
    pub missing_translations: Vec<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub name: String,
    /// Number of flattened keys; 0 for malformed JSON
    pub key_count: usize,
    pub valid_json: bool,
    pub missing_field_count: usize,
    pub empty_field_count: usize,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationParams {
    pub project_root_path: String,
    /// Language code, e.g. "en"
    pub language: String,
    /// Translation file name without ".json"
    pub name: String,
}

/// One translation file and its raw content
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationFile {
    pub language: String,
    pub name: String,
    pub content: String,
}

// ============================================================
// Mutation Types
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTranslationParams {
    pub project_root_path: String,
    pub language: String,
    pub name: String,
    /// Initial JSON content; defaults to "{}"
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameTranslationParams {
    pub project_root_path: String,
    pub language: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTranslationsParams {
    pub project_root_path: String,
    /// language -> file name -> raw JSON content
    pub translations: BTreeMap<String, BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddFieldParams {
    pub project_root_path: String,
    pub language: String,
    pub name: String,
    /// Dot-separated field path, e.g. "nav.home"
    pub field: String,
    /// Value of the new field; defaults to ""
    #[serde(default)]
    pub value: Option<Value>,
}

/// Outcome of a write operation
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MutationResult {
    pub success: bool,
    /// Files touched by the operation
    pub keys: Vec<TranslationKey>,
    pub message: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddFieldResult {
    pub language: String,
    pub name: String,
    pub field: String,
    /// "added" or "alreadyPresent"
    pub action: String,
}

// ============================================================
// Gap Types (scan_gaps)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanGapsParams {
    pub project_root_path: String,
    /// Only report gaps of this language
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GapScanResult {
    pub summary: GapSummary,
    pub missing_translations: MissingTranslations,
    pub missing_fields: MissingFields,
}

// ============================================================
// Generation Types (generate_translation)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTranslationParams {
    pub project_root_path: String,
    pub source_language: String,
    pub name: String,
    pub target_language: String,
    /// What the content is about, to improve wording
    #[serde(default)]
    pub context: Option<String>,
    /// Translate keys as well as values
    #[serde(default)]
    pub translate_keys: Option<bool>,
}
