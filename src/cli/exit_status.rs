use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed; `check` found no gaps
/// - `Failure` (1): `check` found gaps, or the operation was rejected (not found, validation, I/O)
/// - `Error` (2): Command could not run (config error, unreadable input, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
