use std::fs;

use anyhow::{Context, Result};
use tracing::debug;

use super::super::args::MigrateCommand;
use super::{CommandResult, CommandSummary, MigrateSummary};
use crate::core::{MigrateContext, MigrationOutcome};

pub fn migrate(cmd: MigrateCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = MigrateContext::new(&args.common)?;
    let outcome = ctx.migrate_all();

    let files_written = if args.apply {
        write_changes(&outcome)?
    } else {
        0
    };

    Ok(CommandResult {
        summary: CommandSummary::Migrate(MigrateSummary {
            source_files_checked: ctx.files.len(),
            locale_count: ctx.catalog.locales().len(),
            message_warnings: ctx.message_warnings,
            skipped_count: ctx.skipped_count,
            outcome,
            is_apply: args.apply,
            files_written,
        }),
    })
}

fn write_changes(outcome: &MigrationOutcome) -> Result<usize> {
    let mut written = 0;
    for migration in outcome.changed() {
        fs::write(&migration.file_path, &migration.output)
            .with_context(|| format!("Failed to write {}", migration.file_path))?;
        debug!(file = %migration.file_path, "wrote migrated file");
        written += 1;
    }
    Ok(written)
}
