use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, Result, bail};
use serde_json::Value;

/// Flattened messages of one locale file, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleMessages {
    pub locale: String,
    pub file_path: String,
    /// `(key path, value)` pairs; key paths are dot-separated.
    pub entries: Vec<(String, String)>,
}

impl LocaleMessages {
    pub fn new(locale: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            file_path: file_path.into(),
            entries: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Messages of every locale, keyed (and therefore sorted) by locale name.
pub type AllLocaleMessages = BTreeMap<String, LocaleMessages>;

/// A warning from scanning message files.
#[derive(Debug, Clone)]
pub struct MessageScanWarning {
    pub file_path: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct ScanMessagesResult {
    pub messages: AllLocaleMessages,
    pub warnings: Vec<MessageScanWarning>,
}

pub fn parse_json_file(path: &Path, locale: &str) -> Result<LocaleMessages> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {:?}", path))?;

    let json: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {:?}", path))?;

    let mut messages = LocaleMessages::new(locale, path.to_string_lossy());
    flatten_json(&json, String::new(), &mut messages);
    Ok(messages)
}

/// Flatten nested objects into dot-separated key paths.
///
/// Arrays expand with their indices (`items.0`, `items.1`). Numbers, booleans
/// and nulls are not messages and are skipped.
fn flatten_json(value: &Value, prefix: String, result: &mut LocaleMessages) {
    let join = |segment: &str| {
        if prefix.is_empty() {
            segment.to_string()
        } else {
            format!("{}.{}", prefix, segment)
        }
    };

    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten_json(val, join(key), result);
            }
        }
        Value::Array(arr) => {
            for (index, val) in arr.iter().enumerate() {
                flatten_json(val, join(&index.to_string()), result);
            }
        }
        Value::String(s) if !prefix.is_empty() => {
            result.entries.push((prefix, s.clone()));
        }
        _ => {}
    }
}

/// Extracts locale from filename.
///
/// Examples:
/// - "en.json" -> Some("en")
/// - "zh-CN.json" -> Some("zh-CN")
/// - "/path/to/locales/ja.json" -> Some("ja")
pub fn extract_locale(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// Load every `*.json` file directly under `message_dir`.
///
/// Files that fail to read or parse become warnings; a missing directory is
/// an error.
pub fn scan_message_files(message_dir: impl AsRef<Path>) -> Result<ScanMessagesResult> {
    let message_dir = message_dir.as_ref();
    let mut result = ScanMessagesResult::default();

    if !message_dir.exists() {
        bail!(
            "Messages directory '{}' does not exist.\n\
             Hint: Check your .i18nifyrc.json 'messagesRoot' setting.",
            message_dir.display()
        );
    }

    if !message_dir.is_dir() {
        bail!("'{}' is not a directory.", message_dir.display());
    }

    for entry in fs::read_dir(message_dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) == Some("json")
            && let Some(locale) = extract_locale(&path)
        {
            match parse_json_file(&path, &locale) {
                Ok(messages) => {
                    result.messages.insert(locale, messages);
                }
                Err(e) => {
                    result.warnings.push(MessageScanWarning {
                        file_path: path.to_string_lossy().to_string(),
                        error: format!("{:#}", e),
                    });
                }
            }
        }
    }

    Ok(result)
}
