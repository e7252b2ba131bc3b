//! Single-file commands.

use std::fs;

use anyhow::{Context, Result};
use serde_json::Value;

use super::super::{
    args::{
        AddFieldCommand, CreateCommand, DeleteCommand, RenameCommand, ShowCommand, UploadCommand,
    },
    exit_status::ExitStatus,
    report::print_success,
};
use super::helper::{finish, open_dashboard};

pub async fn show(cmd: ShowCommand) -> Result<ExitStatus> {
    let mut dashboard = open_dashboard(&cmd.common).await?;
    let result = dashboard.get(&cmd.target.language, &cmd.target.name).await;
    Ok(finish(result, |content| println!("{}", content)))
}

pub async fn create(cmd: CreateCommand) -> Result<ExitStatus> {
    let content = match &cmd.from {
        Some(path) => Some(
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?,
        ),
        None => cmd.content.clone(),
    };

    let mut dashboard = open_dashboard(&cmd.common).await?;
    let (language, name) = (&cmd.target.language, &cmd.target.name);
    let result = dashboard.create(language, name, content.as_deref()).await;
    Ok(finish(result, |_| {
        print_success(&format!("Created {}/{}.json", language, name))
    }))
}

pub async fn delete(cmd: DeleteCommand) -> Result<ExitStatus> {
    let mut dashboard = open_dashboard(&cmd.common).await?;
    let (language, name) = (&cmd.target.language, &cmd.target.name);
    let result = dashboard.delete(language, name).await;
    Ok(finish(result, |_| {
        print_success(&format!("Deleted {}/{}.json", language, name))
    }))
}

pub async fn rename(cmd: RenameCommand) -> Result<ExitStatus> {
    let mut dashboard = open_dashboard(&cmd.common).await?;
    let result = dashboard.rename(&cmd.language, &cmd.from, &cmd.to).await;
    Ok(finish(result, |_| {
        print_success(&format!(
            "Renamed {lang}/{}.json to {lang}/{}.json",
            cmd.from,
            cmd.to,
            lang = cmd.language
        ))
    }))
}

pub async fn upload(cmd: UploadCommand) -> Result<ExitStatus> {
    let content = fs::read_to_string(&cmd.file)
        .with_context(|| format!("Failed to read {:?}", cmd.file))?;
    let file_name = cmd
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut dashboard = open_dashboard(&cmd.common).await?;
    let (language, name) = (&cmd.target.language, &cmd.target.name);
    let result = dashboard.upload(language, name, &file_name, &content).await;
    Ok(finish(result, |_| {
        print_success(&format!("Uploaded {} to {}/{}.json", file_name, language, name))
    }))
}

pub async fn add_field(cmd: AddFieldCommand) -> Result<ExitStatus> {
    let value = if cmd.json {
        serde_json::from_str(&cmd.value)
            .with_context(|| format!("--value is not valid JSON: {}", cmd.value))?
    } else {
        Value::String(cmd.value.clone())
    };

    let mut dashboard = open_dashboard(&cmd.common).await?;
    let (language, name) = (&cmd.target.language, &cmd.target.name);
    let result = dashboard.add_field(language, name, &cmd.field, value).await;
    Ok(finish(result, |action| {
        print_success(&format!(
            "{} {} in {}/{}.json",
            cmd.field,
            action.as_str(),
            language,
            name
        ))
    }))
}
