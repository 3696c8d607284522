//! Report formatting and printing utilities.
//!
//! Kept apart from the migration engine so i18nify can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, InitSummary, MigrateSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{BlockSite, FileMigration, context::FileError};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Migrate(summary) => {
            print_migrate_to(summary, verbose, &mut io::stdout().lock());
            print_warnings_to(summary, verbose, &mut io::stderr().lock());
        }
        CommandSummary::Init(summary) => print_init(summary),
    }
}

/// Print the migration preview and summary to a custom writer.
pub fn print_migrate_to<W: Write>(summary: &MigrateSummary, verbose: bool, writer: &mut W) {
    let outcome = &summary.outcome;

    if !summary.is_apply || verbose {
        for migration in outcome.changed() {
            print_file_preview(migration, writer);
        }
    }

    for error in &outcome.errors {
        print_file_error(error, writer);
    }

    let changed_files = outcome.changed().count();
    let replacements = outcome.replacement_count();

    if changed_files == 0 {
        if outcome.errors.is_empty() {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "Checked {} component {} - nothing to migrate",
                    summary.source_files_checked,
                    plural(summary.source_files_checked, "file", "files")
                )
                .green()
            );
        }
    } else if summary.is_apply {
        let _ = writeln!(
            writer,
            "{} {} string(s) in {} file(s).",
            "Migrated".green().bold(),
            replacements,
            summary.files_written
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} string(s) in {} file(s).",
            "Would migrate".yellow().bold(),
            replacements,
            changed_files
        );
        let _ = writeln!(
            writer,
            "Run with {} to write these changes.",
            "--apply".cyan()
        );
    }

    if !outcome.errors.is_empty() {
        let count = outcome.errors.len();
        let _ = writeln!(
            writer,
            "\n{} {} {} could not be migrated",
            FAILURE_MARK.red(),
            count,
            plural(count, "file", "files")
        );
    }
}

/// Print scan and locale warnings to a custom writer.
pub fn print_warnings_to<W: Write>(summary: &MigrateSummary, verbose: bool, writer: &mut W) {
    if summary.locale_count == 0 {
        let _ = writeln!(
            writer,
            "{} no locale files found; nothing can be resolved",
            "warning:".bold().yellow()
        );
    }

    for warning in &summary.message_warnings {
        let _ = writeln!(
            writer,
            "{} {}: {}",
            "warning:".bold().yellow(),
            warning.file_path,
            warning.error
        );
    }

    if summary.skipped_count > 0 {
        let _ = writeln!(
            writer,
            "{} {} path(s) skipped due to access errors{}",
            "warning:".bold().yellow(),
            summary.skipped_count,
            if verbose { "" } else { " (use -v for details)" }
        );
    }
}

fn print_file_preview<W: Write>(migration: &FileMigration, writer: &mut W) {
    for replacement in &migration.replacements {
        let site = match replacement.site {
            BlockSite::Script => "script",
            BlockSite::Template => "template",
        };
        let _ = writeln!(
            writer,
            "  {} {}:{}:{}  {}",
            "-->".blue(),
            migration.file_path,
            replacement.line,
            replacement.col,
            site.dimmed().cyan()
        );
        let _ = writeln!(
            writer,
            "      \"{}\" {} {}",
            replacement.text,
            "->".blue(),
            replacement.replacement.green()
        );
    }

    if migration.replacements.is_empty() {
        let _ = writeln!(
            writer,
            "  {} {}  {}",
            "-->".blue(),
            migration.file_path,
            "declarations only".dimmed().cyan()
        );
    }
}

fn print_file_error<W: Write>(error: &FileError, writer: &mut W) {
    let _ = writeln!(writer, "{}: {}", "error".bold().red(), error.error);
    let _ = writeln!(writer, "  {} {}", "-->".blue(), error.file_path);
}

fn print_init(summary: &InitSummary) {
    match &summary.error {
        Some(error) => eprintln!("Error: {}", error),
        None => println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        ),
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
