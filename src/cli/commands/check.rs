use anyhow::Result;

use super::super::{
    args::{CheckCommand, ListCommand},
    exit_status::ExitStatus,
    report::{print_gap_report, print_translation_list},
};
use super::helper::open_dashboard;

/// Exits with [`ExitStatus::Failure`] when any gap exists.
pub async fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let dashboard = open_dashboard(&cmd.common).await?;
    let report = dashboard.scan_gaps();

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_gap_report(&report, dashboard.list());
    }

    if report.has_gaps() {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}

pub async fn list(cmd: ListCommand) -> Result<ExitStatus> {
    let dashboard = open_dashboard(&cmd.common).await?;
    print_translation_list(dashboard.list(), &dashboard.scan_gaps());
    Ok(ExitStatus::Success)
}
