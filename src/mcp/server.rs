use std::path::Path;

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use serde_json::Value;

use crate::{
    config::{ConfigLoadResult, ConfigOverrides, load_config},
    core::{
        json::{FlatDocument, try_parse},
        types::TranslationKey,
    },
    dashboard::{Dashboard, DashboardError, ErrorKind},
    translate::TranslateOptions,
};

use super::types::{
    AddFieldParams, AddFieldResult, ConfigDto, ConfigValues, CreateTranslationParams, FileInfo,
    GapScanResult, GenerateTranslationParams, GetConfigParams, LanguageInfo,
    ListTranslationsParams, MutationResult, RenameTranslationParams, ScanGapsParams,
    TranslationFile, TranslationParams, TranslationsResult, UpdateTranslationsParams,
};

fn load(project_root_path: &str) -> Result<ConfigLoadResult, McpError> {
    load_config(Path::new(project_root_path), &ConfigOverrides::default())
        .map_err(|e| McpError::internal_error(format!("Failed to load config: {:#}", e), None))
}

async fn open_dashboard(project_root_path: &str) -> Result<Dashboard, McpError> {
    let loaded = load(project_root_path)?;
    let mut dashboard = loaded.config.build_dashboard(&loaded.base_dir);
    dashboard.refresh().await.map_err(tool_error)?;
    Ok(dashboard)
}

/// Map the dashboard's failure classes onto JSON-RPC errors.
fn tool_error(err: DashboardError) -> McpError {
    let message = err.to_string();
    match err.kind() {
        ErrorKind::NotFound => McpError::resource_not_found(message, None),
        ErrorKind::Validation => McpError::invalid_params(message, None),
        ErrorKind::Io => McpError::internal_error(message, None),
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

fn mutation(keys: Vec<TranslationKey>, message: String) -> MutationResult {
    MutationResult {
        success: true,
        keys,
        message,
    }
}

#[derive(Clone)]
pub struct I18nBoardMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for I18nBoardMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl I18nBoardMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Get the effective configuration
    #[tool(description = "Get the effective i18nboard configuration (store location, prefix, concurrency, whether AI generation is available).")]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let loaded = load(&params.0.project_root_path)?;
        let config = &loaded.config;

        let dto = ConfigDto {
            from_file: loaded.from_file,
            config: ConfigValues {
                store_root: config.store_root.clone(),
                store_root_path: config
                    .store_root_path(&loaded.base_dir)
                    .display()
                    .to_string(),
                prefix: config.prefix.clone(),
                download_concurrency: config.download_concurrency,
                upload_concurrency: config.upload_concurrency,
                ai_configured: !config.ai.api_key.trim().is_empty(),
                model: config.ai.model.clone(),
            },
        };
        json_result(&dto)
    }

    /// List languages and translation files with gap counts
    #[tool(description = "List every language and its translation files, with key counts and per-file missing/empty field counts.")]
    pub async fn list_translations(
        &self,
        params: Parameters<ListTranslationsParams>,
    ) -> Result<CallToolResult, McpError> {
        let dashboard = open_dashboard(&params.0.project_root_path).await?;
        let state = dashboard.state();

        let languages = state
            .translations()
            .iter()
            .map(|(language, files)| LanguageInfo {
                language: language.clone(),
                files: files
                    .iter()
                    .map(|(name, content)| {
                        let gaps = state.field_gaps(language, name);
                        FileInfo {
                            name: name.clone(),
                            key_count: FlatDocument::parse(content).len(),
                            valid_json: try_parse(content).is_ok(),
                            missing_field_count: gaps.map_or(0, |g| g.missing.len()),
                            empty_field_count: gaps.map_or(0, |g| g.empty.len()),
                        }
                    })
                    .collect(),
                missing_translations: state
                    .missing_translations()
                    .get(language)
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect();

        json_result(&TranslationsResult { languages })
    }

    /// Get one translation file
    #[tool(description = "Get the raw JSON content of one translation file.")]
    pub async fn get_translation(
        &self,
        params: Parameters<TranslationParams>,
    ) -> Result<CallToolResult, McpError> {
        let TranslationParams {
            project_root_path,
            language,
            name,
        } = params.0;
        let mut dashboard = open_dashboard(&project_root_path).await?;
        let content = dashboard
            .get(&language, &name)
            .await
            .map_err(tool_error)?;

        json_result(&TranslationFile {
            language,
            name,
            content,
        })
    }

    /// Create a translation file
    #[tool(description = "Create a translation file with optional initial JSON content. Fails if the file already exists.")]
    pub async fn create_translation(
        &self,
        params: Parameters<CreateTranslationParams>,
    ) -> Result<CallToolResult, McpError> {
        let CreateTranslationParams {
            project_root_path,
            language,
            name,
            content,
        } = params.0;
        let mut dashboard = open_dashboard(&project_root_path).await?;
        let content = dashboard
            .create(&language, &name, content.as_deref())
            .await
            .map_err(tool_error)?;

        json_result(&TranslationFile {
            language,
            name,
            content,
        })
    }

    /// Delete a translation file
    #[tool(description = "Delete a translation file. Deleting a file that does not exist succeeds.")]
    pub async fn delete_translation(
        &self,
        params: Parameters<TranslationParams>,
    ) -> Result<CallToolResult, McpError> {
        let TranslationParams {
            project_root_path,
            language,
            name,
        } = params.0;
        let mut dashboard = open_dashboard(&project_root_path).await?;
        dashboard
            .delete(&language, &name)
            .await
            .map_err(tool_error)?;

        let key = TranslationKey::new(language, name);
        let message = format!("Deleted {}", key);
        json_result(&mutation(vec![key], message))
    }

    /// Rename a translation file
    #[tool(description = "Rename a translation file within one language (copy, then delete the original).")]
    pub async fn rename_translation(
        &self,
        params: Parameters<RenameTranslationParams>,
    ) -> Result<CallToolResult, McpError> {
        let RenameTranslationParams {
            project_root_path,
            language,
            from,
            to,
        } = params.0;
        let mut dashboard = open_dashboard(&project_root_path).await?;
        dashboard
            .rename(&language, &from, &to)
            .await
            .map_err(tool_error)?;

        let message = format!("Renamed {}/{} to {}/{}", language, from, language, to);
        json_result(&mutation(vec![TranslationKey::new(language, to)], message))
    }

    /// Write many translation files at once
    #[tool(description = "Write many translation files at once (language -> file name -> JSON content). Reports which files failed if the write was incomplete.")]
    pub async fn update_translations(
        &self,
        params: Parameters<UpdateTranslationsParams>,
    ) -> Result<CallToolResult, McpError> {
        let UpdateTranslationsParams {
            project_root_path,
            translations,
        } = params.0;
        let mut dashboard = open_dashboard(&project_root_path).await?;
        let written = dashboard
            .update_many(translations)
            .await
            .map_err(tool_error)?;

        let message = format!("Wrote {} translation file(s)", written.len());
        json_result(&mutation(written, message))
    }

    /// Add a field to a translation file
    #[tool(description = "Add a field (dot notation, e.g. \"nav.home\") to a translation file unless it already exists. Creates the file if needed.")]
    pub async fn add_field(
        &self,
        params: Parameters<AddFieldParams>,
    ) -> Result<CallToolResult, McpError> {
        let AddFieldParams {
            project_root_path,
            language,
            name,
            field,
            value,
        } = params.0;
        let mut dashboard = open_dashboard(&project_root_path).await?;
        let action = dashboard
            .add_field(
                &language,
                &name,
                &field,
                value.unwrap_or_else(|| Value::String(String::new())),
            )
            .await
            .map_err(tool_error)?;

        json_result(&AddFieldResult {
            language,
            name,
            field,
            action: action.as_str().to_string(),
        })
    }

    /// Scan for missing translations and missing/empty fields
    #[tool(description = "Report translation files missing per language and, for files every language has, fields that are missing or empty. Use this first to see what needs work.")]
    pub async fn scan_gaps(
        &self,
        params: Parameters<ScanGapsParams>,
    ) -> Result<CallToolResult, McpError> {
        let ScanGapsParams {
            project_root_path,
            language,
        } = params.0;
        let dashboard = open_dashboard(&project_root_path).await?;
        let mut report = dashboard.scan_gaps();

        if let Some(language) = &language {
            if !dashboard.state().translations().contains_key(language) {
                return Err(McpError::resource_not_found(
                    format!("language '{}' not found", language),
                    None,
                ));
            }
            report.missing_translations.retain(|l, _| l == language);
            report.missing_fields.retain(|l, _| l == language);
        }

        json_result(&GapScanResult {
            summary: report.summary(),
            missing_translations: report.missing_translations,
            missing_fields: report.missing_fields,
        })
    }

    /// Translate a file into a new language with AI
    #[tool(description = "Translate one file into a new target language with AI, keeping its structure, and store the result. Requires an OpenAI API key.")]
    pub async fn generate_translation(
        &self,
        params: Parameters<GenerateTranslationParams>,
    ) -> Result<CallToolResult, McpError> {
        let GenerateTranslationParams {
            project_root_path,
            source_language,
            name,
            target_language,
            context,
            translate_keys,
        } = params.0;
        let mut dashboard = open_dashboard(&project_root_path).await?;
        let options = TranslateOptions {
            context,
            translate_keys,
        };
        let content = dashboard
            .generate(&source_language, &name, &target_language, options)
            .await
            .map_err(tool_error)?;

        json_result(&TranslationFile {
            language: target_language,
            name,
            content,
        })
    }
}

#[tool_handler]
impl ServerHandler for I18nBoardMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "i18nboard MCP manages per-language JSON translation files and finds translation gaps.\n\n\
                 Available tools:\n\
                 1. get_config - Get the effective configuration\n\
                 2. list_translations - List languages and files with gap counts\n\
                 3. scan_gaps - Missing translation files and missing/empty fields\n\
                 4. get_translation - Read one file\n\
                 5. create_translation / delete_translation / rename_translation - Manage files\n\
                 6. update_translations - Write many files at once\n\
                 7. add_field - Add a field to a file\n\
                 8. generate_translation - AI-translate a file into a new language\n\n\
                 Recommended Workflow:\n\
                 1. Use scan_gaps to see what is missing\n\
                 2. Create or generate missing translation files first\n\
                 3. Then fill missing fields with add_field or update_translations\n\
                 4. Finally fill empty fields"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            tracing::info!("Starting MCP server on stdio");
            let service = I18nBoardMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
