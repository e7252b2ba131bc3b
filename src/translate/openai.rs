use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{TranslateError, TranslationRequest, Translator};
use crate::{config::AiConfig, core::json::try_parse};

/// System message describing the translation contract to the model.
pub const TRANSLATION_INSTRUCTION: &str = r#"You translate i18n resource files.
The user message is a JSON object:
{
  "oldLanguage": "en",
  "newLanguage": "es",
  "translation": { ...the document to translate... },
  "options": { "context": "optional description of the content", "translateKeys": false }
}
Rules:
1. Keep the exact JSON structure of "translation", including every nested object.
2. Keep keys in their original language unless "translateKeys" is true.
3. Values may contain Markdown; keep every Markdown marker in place.
4. Use "context", when given, to choose accurate wording.
Respond with the translated document only, as a JSON object, with no surrounding text."#;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// [`Translator`] backed by an OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiTranslator {
    http: reqwest::Client,
    api_key: String,
    project_id: Option<String>,
    model: String,
    base_url: String,
}

impl OpenAiTranslator {
    /// Fails with [`TranslateError::MissingCredentials`] when no API key is configured.
    pub fn from_config(config: &AiConfig) -> Result<Self, TranslateError> {
        if config.api_key.trim().is_empty() {
            return Err(TranslateError::MissingCredentials);
        }
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            project_id: Some(config.project_id.clone()).filter(|p| !p.is_empty()),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn request_body(&self, request: &TranslationRequest) -> Result<Value, TranslateError> {
        let user_message = serde_json::to_string(request)
            .map_err(|e| TranslateError::InvalidDocument(e.to_string()))?;
        Ok(json!({
            "model": self.model,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": TRANSLATION_INSTRUCTION },
                { "role": "user", "content": user_message }
            ],
            "n": 1
        }))
    }
}

/// Extract the translated document from a chat completion response.
fn parse_completion(response: &Value) -> Result<Value, TranslateError> {
    let content = response["choices"][0]["message"]["content"]
        .as_str()
        .filter(|c| !c.trim().is_empty())
        .ok_or(TranslateError::EmptyResponse)?;

    match try_parse(content) {
        Ok(document @ Value::Object(_)) => Ok(document),
        Ok(_) => Err(TranslateError::InvalidDocument(
            "expected a JSON object".to_string(),
        )),
        Err(e) => Err(TranslateError::InvalidDocument(e.to_string())),
    }
}

#[async_trait]
impl Translator for OpenAiTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<Value, TranslateError> {
        tracing::info!(
            from = %request.old_language,
            to = %request.new_language,
            model = %self.model,
            "Requesting AI translation"
        );

        let body = self.request_body(request)?;
        let mut http_request = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json");
        if let Some(project) = &self.project_id {
            http_request = http_request.header("OpenAI-Project", project);
        }

        let response = http_request.json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        parse_completion(&body)
    }
}
