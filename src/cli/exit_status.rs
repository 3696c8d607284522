use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): nothing left to migrate, or changes were written
/// - `Failure` (1): dry-run found pending changes, or `init` found an existing config
/// - `Error` (2): a file or the configuration could not be processed
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
