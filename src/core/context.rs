use std::{
    collections::BTreeSet,
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context as _, Result, anyhow};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        file_scanner::scan_files,
        migrate::{FileMigration, MigrateOptions, migrate_source},
        parsers::json::MessageScanWarning,
        resolver::MessageCatalog,
    },
};

/// A file that could not be migrated.
#[derive(Debug, Clone)]
pub struct FileError {
    pub file_path: String,
    pub error: String,
}

/// Result of migrating every scanned file.
#[derive(Debug, Default)]
pub struct MigrationOutcome {
    /// Successfully processed files, sorted by path.
    pub migrations: Vec<FileMigration>,
    /// Files that failed to read, parse or transform, sorted by path.
    pub errors: Vec<FileError>,
}

impl MigrationOutcome {
    /// Files whose content would change.
    pub fn changed(&self) -> impl Iterator<Item = &FileMigration> {
        self.migrations.iter().filter(|m| m.changed)
    }

    pub fn replacement_count(&self) -> usize {
        self.changed().map(|m| m.replacements.len()).sum()
    }
}

/// Project-wide migration state.
///
/// Configuration is merged with the following priority (highest to lowest):
/// 1. CLI arguments (e.g. `--messages-root locales`)
/// 2. `.i18nifyrc.json` config file
/// 3. Built-in defaults
pub struct MigrateContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root directory (for resolving relative paths).
    pub root_dir: PathBuf,

    /// Component files to migrate.
    pub files: BTreeSet<String>,

    /// Resolver built from the locale files.
    pub catalog: MessageCatalog,

    /// Locale files that could not be parsed.
    pub message_warnings: Vec<MessageScanWarning>,

    /// Paths skipped during the scan due to access errors.
    pub skipped_count: usize,

    pub verbose: bool,
}

impl MigrateContext {
    /// Load configuration, scan component files and load the message catalog.
    ///
    /// # Errors
    ///
    /// Returns error if the config file is invalid or the messages directory
    /// does not exist.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        // Priority: CLI --source-root arg > current directory
        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let path = root_dir
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", root_dir))?;

        let config_result = load_config(Path::new(path))?;
        if !config_result.from_file {
            info!("no .i18nifyrc.json found, using default configuration");
        }

        let mut config = config_result.config;
        if let Some(ref messages_root) = common_args.messages_root {
            config.messages_root = messages_root.to_string_lossy().to_string();
        }

        let message_dir = resolve_message_dir(&root_dir, &config.messages_root);

        let (scan_result, catalog_result) = rayon::join(
            || scan_files(path, &config.includes, &config.ignores),
            || MessageCatalog::load(&message_dir),
        );

        let (catalog, message_warnings) = catalog_result?;
        let catalog = catalog.with_ignored_texts(config.ignore_texts.iter().cloned());
        if catalog.is_empty() {
            warn!(dir = %message_dir.display(), "message catalog is empty");
        }

        Ok(Self {
            config,
            root_dir,
            files: scan_result.files,
            catalog,
            message_warnings,
            skipped_count: scan_result.skipped_count,
            verbose,
        })
    }

    pub fn options(&self) -> MigrateOptions {
        MigrateOptions {
            rewrite_template: self.config.rewrite_template,
            force_declarations: self.config.force_declarations,
        }
    }

    /// Migrate every scanned file in parallel. Nothing is written.
    ///
    /// Each worker reads, parses and prints its own file; a failing file is
    /// recorded and does not stop the others.
    pub fn migrate_all(&self) -> MigrationOutcome {
        let options = self.options();
        let results: Vec<(String, Result<FileMigration>)> = self
            .files
            .par_iter()
            .map(|file_path| {
                let result = fs::read_to_string(file_path)
                    .with_context(|| format!("Failed to read {}", file_path))
                    .and_then(|source| {
                        migrate_source(file_path, &source, &self.catalog, options)
                    });
                (file_path.clone(), result)
            })
            .collect();

        let mut outcome = MigrationOutcome::default();
        for (file_path, result) in results {
            match result {
                Ok(migration) => {
                    if migration.changed {
                        info!(
                            file = %file_path,
                            replacements = migration.replacements.len(),
                            "migrated"
                        );
                    }
                    outcome.migrations.push(migration);
                }
                Err(e) => {
                    let error = format!("{:#}", e);
                    debug!(file = %file_path, error = %error, "skipped");
                    outcome.errors.push(FileError { file_path, error });
                }
            }
        }
        outcome.migrations.sort_by(|a, b| a.file_path.cmp(&b.file_path));
        outcome.errors.sort_by(|a, b| a.file_path.cmp(&b.file_path));
        outcome
    }
}

/// Relative message roots are resolved against the source root unless the
/// source root is the current directory.
fn resolve_message_dir(root_dir: &Path, messages_root: &str) -> PathBuf {
    let p = Path::new(messages_root);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    let is_cur_dir = root_dir
        .components()
        .all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        p.to_path_buf()
    } else {
        let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
        root_dir.join(rel)
    }
}
