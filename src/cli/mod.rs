//! Command-line interface layer.

mod args;
mod commands;
mod exit_status;
mod report;
mod run;

use anyhow::Result;

pub use args::{Arguments, Command, CommonArgs};
pub use exit_status::ExitStatus;
pub use report::{print_gap_report_to, print_translation_list_to};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    crate::logging::init(args.verbose());

    let Some(Arguments {
        command: Some(command),
    }) = args.with_command_or_help()
    else {
        return Ok(ExitStatus::Success);
    };

    run::run(command)
}
