use thiserror::Error;

/// Failures of a single script transformation.
///
/// The engine only fails on input it cannot rewrite without producing broken
/// code. The tree is left untouched when an error is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// `import * as X from "<module>"` cannot be extended with named members.
    #[error(
        "cannot add named imports to namespace import of \"{module}\"; import the members explicitly"
    )]
    NamespaceImport { module: String },
}
