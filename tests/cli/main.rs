use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod files;

const BIN_NAME: &str = "i18nboard";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A project whose config points at `translations/`, holding `files`
    /// as `(language, name, content)`.
    pub fn with_translations(files: &[(&str, &str, &str)]) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(".i18nboardrc.json", r#"{ "storeRoot": "translations" }"#)?;
        fs::create_dir_all(test.project_dir.join("translations"))?;
        for (language, name, content) in files {
            test.write_file(&translation_path(language, name), content)?;
        }
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn read_translation(&self, language: &str, name: &str) -> Result<serde_json::Value> {
        let content = self.read_file(&translation_path(language, name))?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    /// Run `i18nboard <args>` and capture its output.
    pub fn run(&self, args: &[&str]) -> Result<Output> {
        self.command()
            .args(args)
            .output()
            .with_context(|| format!("Failed to run {} {:?}", BIN_NAME, args))
    }
}

pub fn translation_path(language: &str, name: &str) -> String {
    format!("translations/{}/{}.json", language, name)
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
