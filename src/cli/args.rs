//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Report missing translations and missing/empty fields
//! - `list`: List languages and their translation files
//! - `show`, `create`, `delete`, `rename`, `upload`, `add-field`: File management
//! - `generate`: AI-translate a file into a new language
//! - `init`: Initialize the configuration file
//! - `serve`: Start the MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::{ConfigOverrides, ENV_PREFIX, ENV_STORE_ROOT};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        self.command
            .as_ref()
            .and_then(Command::common)
            .is_some_and(|common| common.verbose)
    }
}

/// Common arguments shared by all store commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Directory backing the translation store (overrides config file)
    #[arg(long, env = ENV_STORE_ROOT)]
    pub store_root: Option<String>,

    /// Key prefix inside the store (overrides config file)
    #[arg(long, env = ENV_PREFIX)]
    pub prefix: Option<String>,

    /// Maximum simultaneous store operations (overrides config file)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            store_root: self.store_root.clone(),
            prefix: self.prefix.clone(),
            concurrency: self.concurrency,
        }
    }
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// One translation file of one language.
#[derive(Debug, Args)]
pub struct FileTarget {
    /// Language code, e.g. `en`
    pub language: String,
    /// Translation file name without `.json`
    pub name: String,
}

#[derive(Debug, Args)]
pub struct ShowCommand {
    #[command(flatten)]
    pub target: FileTarget,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CreateCommand {
    #[command(flatten)]
    pub target: FileTarget,
    /// Initial JSON content (defaults to `{}`)
    #[arg(long, conflicts_with = "from")]
    pub content: Option<String>,
    /// Read the initial content from a file
    #[arg(long)]
    pub from: Option<PathBuf>,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct DeleteCommand {
    #[command(flatten)]
    pub target: FileTarget,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct RenameCommand {
    /// Language code
    pub language: String,
    /// Current file name
    pub from: String,
    /// New file name
    pub to: String,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct UploadCommand {
    #[command(flatten)]
    pub target: FileTarget,
    /// JSON file to upload; its name must match the target name
    pub file: PathBuf,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct AddFieldCommand {
    #[command(flatten)]
    pub target: FileTarget,
    /// Field path in dot notation, e.g. `nav.home`
    pub field: String,
    /// Value for the new field
    #[arg(long, default_value = "")]
    pub value: String,
    /// Parse `--value` as JSON instead of a plain string
    #[arg(long)]
    pub json: bool,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Source language code
    pub source_language: String,
    /// Translation file name without `.json`
    pub name: String,
    /// Target language code
    pub target_language: String,
    /// What the content is about, to improve wording
    #[arg(long)]
    pub context: Option<String>,
    /// Translate keys as well as values
    #[arg(long)]
    pub translate_keys: bool,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report missing translations and missing or empty fields
    Check(CheckCommand),
    /// List languages and their translation files
    List(ListCommand),
    /// Print one translation file
    Show(ShowCommand),
    /// Create a translation file
    Create(CreateCommand),
    /// Delete a translation file
    Delete(DeleteCommand),
    /// Rename a translation file within a language
    Rename(RenameCommand),
    /// Replace a translation file with a local JSON file
    Upload(UploadCommand),
    /// Add a field to a translation file unless it already exists
    AddField(AddFieldCommand),
    /// Translate a file into a new language with AI
    Generate(GenerateCommand),
    /// Initialize a new .i18nboardrc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}

impl Command {
    pub fn common(&self) -> Option<&CommonArgs> {
        match self {
            Command::Check(cmd) => Some(&cmd.common),
            Command::List(cmd) => Some(&cmd.common),
            Command::Show(cmd) => Some(&cmd.common),
            Command::Create(cmd) => Some(&cmd.common),
            Command::Delete(cmd) => Some(&cmd.common),
            Command::Rename(cmd) => Some(&cmd.common),
            Command::Upload(cmd) => Some(&cmd.common),
            Command::AddField(cmd) => Some(&cmd.common),
            Command::Generate(cmd) => Some(&cmd.common),
            Command::Init | Command::Serve => None,
        }
    }
}
