use anyhow::Result;

use super::super::{args::GenerateCommand, exit_status::ExitStatus, report::print_success};
use super::helper::{finish, open_dashboard};
use crate::translate::TranslateOptions;

pub async fn generate(cmd: GenerateCommand) -> Result<ExitStatus> {
    let mut dashboard = open_dashboard(&cmd.common).await?;
    let options = TranslateOptions {
        context: cmd.context.clone(),
        translate_keys: cmd.translate_keys.then_some(true),
    };

    let result = dashboard
        .generate(&cmd.source_language, &cmd.name, &cmd.target_language, options)
        .await;
    Ok(finish(result, |_| {
        print_success(&format!(
            "Generated {}/{}.json from {}",
            cmd.target_language, cmd.name, cmd.source_language
        ))
    }))
}
