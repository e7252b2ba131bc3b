//! AI translation collaborator.
//!
//! A [`Translator`] turns a source translation document into a document for
//! another language. The contract: nesting and key structure are preserved,
//! keys stay untranslated unless `translate_keys` is set, Markdown markers in
//! values survive, and the response is the bare translated document.

mod openai;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use openai::{OpenAiTranslator, TRANSLATION_INSTRUCTION};

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("AI translation is not configured: missing API key")]
    MissingCredentials,
    #[error("translation request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("translation API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("translation API returned no content")]
    EmptyResponse,
    #[error("invalid translation document: {0}")]
    InvalidDocument(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateOptions {
    /// What the content is about, to disambiguate wording.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Translate object keys too. Keys are kept when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate_keys: Option<bool>,
}

impl TranslateOptions {
    fn is_empty(&self) -> bool {
        self.context.is_none() && self.translate_keys.is_none()
    }
}

/// The payload sent to the model as the user message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub old_language: String,
    pub new_language: String,
    pub translation: Value,
    #[serde(skip_serializing_if = "TranslateOptions::is_empty")]
    pub options: TranslateOptions,
}

#[async_trait]
pub trait Translator: Send + Sync {
    /// Returns the translated document, always a JSON object.
    async fn translate(&self, request: &TranslationRequest) -> Result<Value, TranslateError>;
}
