use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::{
    dashboard::Dashboard,
    repository::{DEFAULT_CONCURRENCY, MAX_CONCURRENCY, TranslationRepository},
    store::FsBlobStore,
    translate::{OpenAiTranslator, TranslateError, Translator},
};

pub const CONFIG_FILE_NAME: &str = ".i18nboardrc.json";

pub const ENV_STORE_ROOT: &str = "I18NBOARD_STORE_ROOT";
pub const ENV_PREFIX: &str = "I18NBOARD_PREFIX";
pub const ENV_DOWNLOAD_CONCURRENCY: &str = "I18NBOARD_DOWNLOAD_CONCURRENCY";
pub const ENV_UPLOAD_CONCURRENCY: &str = "I18NBOARD_UPLOAD_CONCURRENCY";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_OPENAI_PROJECT_ID: &str = "OPENAI_PROJECT_ID";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_store_root")]
    pub store_root: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default = "default_concurrency")]
    pub download_concurrency: usize,
    #[serde(default = "default_concurrency")]
    pub upload_concurrency: usize,
    #[serde(default)]
    pub ai: AiConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project_id: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_store_root() -> String {
    "./translations".to_string()
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_root: default_store_root(),
            prefix: String::new(),
            download_concurrency: default_concurrency(),
            upload_concurrency: default_concurrency(),
            ai: AiConfig::default(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            project_id: String::new(),
            model: default_model(),
            base_url: default_base_url(),
        }
    }
}

/// Command line values that take precedence over file and environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub store_root: Option<String>,
    pub prefix: Option<String>,
    pub concurrency: Option<usize>,
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("downloadConcurrency", self.download_concurrency),
            ("uploadConcurrency", self.upload_concurrency),
        ] {
            if value == 0 {
                bail!("'{}' must be at least 1", name);
            }
            if value > MAX_CONCURRENCY {
                bail!("'{}' must be at most {}, got {}", name, MAX_CONCURRENCY, value);
            }
        }
        if self.prefix.starts_with('/') || self.prefix.contains("..") {
            bail!(
                "Invalid 'prefix': \"{}\" must be relative and must not contain '..'",
                self.prefix
            );
        }
        Ok(())
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// Numbers that do not parse are ignored with a warning.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(root) = lookup(ENV_STORE_ROOT) {
            self.store_root = root;
        }
        if let Some(prefix) = lookup(ENV_PREFIX) {
            self.prefix = prefix;
        }
        for (name, target) in [
            (ENV_DOWNLOAD_CONCURRENCY, &mut self.download_concurrency),
            (ENV_UPLOAD_CONCURRENCY, &mut self.upload_concurrency),
        ] {
            if let Some(raw) = lookup(name) {
                match raw.trim().parse::<usize>() {
                    Ok(value) => *target = value,
                    Err(_) => tracing::warn!(variable = name, value = %raw, "Ignoring non-numeric override"),
                }
            }
        }
        if let Some(key) = lookup(ENV_OPENAI_API_KEY) {
            self.ai.api_key = key;
        }
        if let Some(project) = lookup(ENV_OPENAI_PROJECT_ID) {
            self.ai.project_id = project;
        }
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(root) = &overrides.store_root {
            self.store_root = root.clone();
        }
        if let Some(prefix) = &overrides.prefix {
            self.prefix = prefix.clone();
        }
        if let Some(concurrency) = overrides.concurrency {
            self.download_concurrency = concurrency;
            self.upload_concurrency = concurrency;
        }
    }

    /// The store directory, resolved against `base_dir` when relative.
    pub fn store_root_path(&self, base_dir: &Path) -> PathBuf {
        let root = Path::new(&self.store_root);
        if root.is_absolute() {
            root.to_path_buf()
        } else {
            base_dir.join(root)
        }
    }

    pub fn build_repository(&self, base_dir: &Path) -> TranslationRepository {
        let root = self.store_root_path(base_dir);
        if !root.is_dir() {
            tracing::warn!(root = %root.display(), "Store root does not exist; starting with no translations");
        }
        TranslationRepository::with_concurrency(
            Arc::new(FsBlobStore::new(root)),
            &self.prefix,
            self.download_concurrency,
            self.upload_concurrency,
        )
    }

    /// The configured translator, or `None` when AI credentials are absent.
    pub fn build_translator(&self) -> Option<Arc<dyn Translator>> {
        match OpenAiTranslator::from_config(&self.ai) {
            Ok(translator) => Some(Arc::new(translator)),
            Err(TranslateError::MissingCredentials) => {
                tracing::debug!("No AI API key configured; generation disabled");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to set up AI translator");
                None
            }
        }
    }

    pub fn build_dashboard(&self, base_dir: &Path) -> Dashboard {
        Dashboard::new(self.build_repository(base_dir), self.build_translator())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    /// Directory relative store paths resolve against.
    pub base_dir: PathBuf,
}

/// Load the config file (or defaults) and apply environment and command line overrides.
pub fn load_config(start_dir: &Path, overrides: &ConfigOverrides) -> Result<ConfigLoadResult> {
    load_config_with_env(start_dir, overrides, |name| std::env::var(name).ok())
}

pub fn load_config_with_env(
    start_dir: &Path,
    overrides: &ConfigOverrides,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ConfigLoadResult> {
    let (mut config, from_file, base_dir) = match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            (config, true, base_dir)
        }
        None => (Config::default(), false, start_dir.to_path_buf()),
    };

    config.apply_env(lookup);
    config.apply_overrides(overrides);
    config.validate()?;

    Ok(ConfigLoadResult {
        config,
        from_file,
        base_dir,
    })
}
