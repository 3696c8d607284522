//! Migration engine.
//!
//! A `.vue` file flows through `parsers::sfc` (block location),
//! `parsers::script` (AST), `transform` (declarations and literal rewrites),
//! `printer` (span-preserving output) and `template` (text nodes).
//! `migrate` ties the steps together per file; `context` runs them across a
//! project.

pub mod context;
pub mod file_scanner;
pub mod migrate;
pub mod parsers;
pub mod printer;
pub mod resolver;
pub mod template;
pub mod transform;

pub use context::{MigrateContext, MigrationOutcome};
pub use migrate::{BlockSite, FileMigration, MigrateOptions, Replacement, migrate_source};
pub use resolver::{KeyResolver, MessageCatalog};
