use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tempfile::TempDir;

mod tools;

/// Test fixture for MCP integration tests
///
/// Manages a temporary project with a config file and a `translations/`
/// directory laid out as `<language>/<name>.json`.
pub struct McpTestFixture {
    _temp_dir: TempDir,
    project_root: PathBuf,
}

impl McpTestFixture {
    /// Create a project with a config file and an empty store
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_root = temp_dir.path().canonicalize()?;
        fs::create_dir_all(project_root.join("translations"))?;

        let fixture = Self {
            _temp_dir: temp_dir,
            project_root,
        };
        fixture.write_config(&json!({ "storeRoot": "translations" }))?;
        Ok(fixture)
    }

    /// Create a project with translation files
    ///
    /// # Example
    /// ```ignore
    /// let fixture = McpTestFixture::with_translations(vec![
    ///     ("en", "common", json!({"title": "Hi"})),
    ///     ("es", "common", json!({"title": "Hola"})),
    /// ])?;
    /// ```
    pub fn with_translations(files: Vec<(&str, &str, Value)>) -> Result<Self> {
        let fixture = Self::new()?;
        for (language, name, content) in files {
            fixture.write_translation(language, name, &content)?;
        }
        Ok(fixture)
    }

    fn translation_path(&self, language: &str, name: &str) -> PathBuf {
        self.project_root
            .join("translations")
            .join(language)
            .join(format!("{}.json", name))
    }

    /// Write translations/<language>/<name>.json
    pub fn write_translation(&self, language: &str, name: &str, content: &Value) -> Result<()> {
        let json_str = serde_json::to_string_pretty(content)
            .with_context(|| format!("Failed to serialize JSON for {}/{}", language, name))?;
        self.write_raw(language, name, &json_str)
    }

    /// Write raw text, which need not be valid JSON
    pub fn write_raw(&self, language: &str, name: &str, content: &str) -> Result<()> {
        let path = self.translation_path(language, name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))
    }

    pub fn read_translation(&self, language: &str, name: &str) -> Result<Value> {
        let path = self.translation_path(language, name);
        let content =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {:?}", path))
    }

    pub fn translation_exists(&self, language: &str, name: &str) -> bool {
        self.translation_path(language, name).exists()
    }

    /// Overwrite .i18nboardrc.json
    pub fn write_config(&self, content: &Value) -> Result<()> {
        let path = self.project_root.join(".i18nboardrc.json");
        fs::write(&path, serde_json::to_string_pretty(content)?)
            .with_context(|| format!("Failed to write config: {:?}", path))
    }

    pub fn root(&self) -> String {
        self.project_root.to_string_lossy().to_string()
    }
}

/// Two languages sharing `common`, with `auth` only in English.
pub fn fixture_two_languages() -> Result<McpTestFixture> {
    McpTestFixture::with_translations(vec![
        ("en", "common", json!({"title": "Hi", "body": "", "nav": {"home": "Home"}})),
        ("en", "auth", json!({"login": "Log in"})),
        ("es", "common", json!({"title": "Hola", "nav": {"home": ""}})),
    ])
}

/// Extract JSON value from a successful CallToolResult
///
/// Panics if the result indicates an error or cannot be parsed
pub fn extract_tool_result_json(result: &rmcp::model::CallToolResult) -> Value {
    if let Some(true) = result.is_error {
        panic!("Tool call returned an error: {:?}", result);
    }

    assert!(
        !result.content.is_empty(),
        "Tool result should have content"
    );

    let text_content = result.content[0]
        .as_text()
        .expect("Tool result content should be text");

    serde_json::from_str(&text_content.text).expect("Tool result should be valid JSON")
}
