//! Translation key resolution.
//!
//! The transform engine only needs a way to turn a literal into a key path.
//! Any `Fn(&str) -> Option<String>` works; `MessageCatalog` is the file-backed
//! implementation used by the CLI.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::core::parsers::json::{AllLocaleMessages, MessageScanWarning, scan_message_files};

/// Maps a display string to the key path of its translation.
///
/// Implementations must be deterministic and free of side effects.
pub trait KeyResolver {
    /// Returns the key path for `text`, or `None` when it has no translation.
    fn resolve(&self, text: &str) -> Option<String>;

    /// Like [`resolve`](Self::resolve), but an empty key counts as no match.
    fn resolve_key(&self, text: &str) -> Option<String> {
        self.resolve(text).filter(|key| !key.is_empty())
    }
}

impl<F> KeyResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, text: &str) -> Option<String> {
        self(text)
    }
}

/// Reverse index from message values to key paths.
///
/// Locales are searched in sorted order and keys in document order; the first
/// exact match wins. Key paths never include the locale.
#[derive(Debug, Default)]
pub struct MessageCatalog {
    keys_by_text: HashMap<String, String>,
    ignored_texts: HashSet<String>,
    locales: Vec<String>,
}

impl MessageCatalog {
    pub fn new(messages: &AllLocaleMessages) -> Self {
        let mut keys_by_text = HashMap::new();
        for locale in messages.values() {
            for (key, value) in &locale.entries {
                keys_by_text
                    .entry(value.clone())
                    .or_insert_with(|| key.clone());
            }
        }
        Self {
            keys_by_text,
            ignored_texts: HashSet::new(),
            locales: messages.keys().cloned().collect(),
        }
    }

    /// Load every locale file under `messages_root`.
    ///
    /// Returns the catalog together with warnings for files that could not be
    /// parsed.
    pub fn load(messages_root: &Path) -> Result<(Self, Vec<MessageScanWarning>)> {
        let scanned = scan_message_files(messages_root)?;
        let catalog = Self::new(&scanned.messages);
        debug!(
            locales = ?catalog.locales,
            messages = catalog.len(),
            "loaded message catalog"
        );
        Ok((catalog, scanned.warnings))
    }

    /// Texts that never resolve, even when a message has them as value.
    pub fn with_ignored_texts<I, S>(mut self, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_texts.extend(texts.into_iter().map(Into::into));
        self
    }

    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// Number of distinct message values.
    pub fn len(&self) -> usize {
        self.keys_by_text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys_by_text.is_empty()
    }
}

impl KeyResolver for MessageCatalog {
    fn resolve(&self, text: &str) -> Option<String> {
        if self.ignored_texts.contains(text) {
            return None;
        }
        self.keys_by_text.get(text).cloned()
    }
}
