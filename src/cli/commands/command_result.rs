use crate::core::{MigrationOutcome, parsers::json::MessageScanWarning};

use super::super::exit_status::ExitStatus;

#[derive(Debug)]
pub struct MigrateSummary {
    pub outcome: MigrationOutcome,
    pub is_apply: bool,
    /// Number of files written; always 0 in dry-run.
    pub files_written: usize,
    pub source_files_checked: usize,
    pub locale_count: usize,
    pub message_warnings: Vec<MessageScanWarning>,
    /// Paths the scanner could not access.
    pub skipped_count: usize,
}

#[derive(Debug)]
pub struct InitSummary {
    /// Set when the config file already existed.
    pub error: Option<String>,
}

#[derive(Debug)]
pub enum CommandSummary {
    Migrate(MigrateSummary),
    Init(InitSummary),
}

/// Result of running an i18nify command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        match &self.summary {
            CommandSummary::Migrate(summary) => {
                if !summary.outcome.errors.is_empty() {
                    ExitStatus::Error
                } else if !summary.is_apply && summary.outcome.changed().next().is_some() {
                    ExitStatus::Failure
                } else {
                    ExitStatus::Success
                }
            }
            CommandSummary::Init(summary) => {
                if summary.error.is_some() {
                    ExitStatus::Failure
                } else {
                    ExitStatus::Success
                }
            }
        }
    }
}
