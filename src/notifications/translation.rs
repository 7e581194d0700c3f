use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use super::keys;

/// Turns a message key into display text.
pub trait Translator: Send + Sync + 'static {
    fn resolve(&self, key: &str) -> String;
}

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("Could not read translations from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Translation file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Translation file must contain a JSON object at the top level")]
    NotAnObject,
}

/// Flat key → text table, loaded from nested JSON such as
/// `{"RESERVATION": {"ACTION": {"SUCCESS": "Done"}}}`.
///
/// Unknown keys resolve to themselves.
#[derive(Debug, Clone, Default)]
pub struct TranslationCatalog {
    entries: HashMap<String, String>,
}

impl TranslationCatalog {
    /// Built-in texts for the reservation page.
    pub fn english() -> Self {
        let entries = [
            (keys::NO_RESPONSE_DATA, "Could not load reservations"),
            (keys::NO_PRODUCT_DATA, "Could not load product details"),
            (keys::ACTION_SUCCESS, "Action completed"),
            (keys::ACTION_UNSUCCESSFUL, "Action unsuccessful"),
            (keys::ACTION_ERROR, "Something went wrong while applying the action"),
        ]
        .into_iter()
        .map(|(key, text)| (key.to_string(), text.to_string()))
        .collect();
        Self { entries }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, TranslationError> {
        let value: Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(TranslationError::NotAnObject);
        }
        let mut entries = HashMap::new();
        flatten("", &value, &mut entries);
        Ok(Self { entries })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TranslationError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| TranslationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Entries from `other` win over ours.
    pub fn merge(mut self, other: TranslationCatalog) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Translator for TranslationCatalog {
    fn resolve(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, out);
            }
        }
        Value::String(text) => {
            out.insert(prefix.to_string(), text.clone());
        }
        // Only strings are translations.
        _ => {}
    }
}
