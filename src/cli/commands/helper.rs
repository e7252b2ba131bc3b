use anyhow::{Context, Result};

use super::super::{args::CommonArgs, exit_status::ExitStatus, report::print_error};
use crate::{config::load_config, dashboard::Dashboard};

/// Load config from the working directory and read the whole store.
pub async fn open_dashboard(common: &CommonArgs) -> Result<Dashboard> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let loaded = load_config(&cwd, &common.overrides())?;
    let mut dashboard = loaded.config.build_dashboard(&loaded.base_dir);
    dashboard
        .refresh()
        .await
        .context("Failed to load translations")?;
    Ok(dashboard)
}

/// Report a rejected operation and turn it into a failing exit status.
pub fn finish<T>(
    result: crate::dashboard::Result<T>,
    on_success: impl FnOnce(T),
) -> ExitStatus {
    match result {
        Ok(value) => {
            on_success(value);
            ExitStatus::Success
        }
        Err(err) => {
            print_error(&err);
            ExitStatus::Failure
        }
    }
}
