//! The shared locale dictionary.
//!
//! A flat `messageId → defaultText` JSON object, shared across all
//! components. It is loaded in full, merged in memory, and re-serialized in
//! full on every extraction. Key order is insertion order (`serde_json` with
//! `preserve_order`) and the output uses 4-space indentation, so repeated
//! merges produce minimal, reviewable diffs.

use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read locale dictionary {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("locale dictionary {} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("locale dictionary {} must be a JSON object at the root", path.display())]
    NotObject { path: PathBuf },
    #[error("failed to serialize locale dictionary {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// What a merge did to the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Added,
    Updated,
}

impl KeyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAction::Added => "added",
            KeyAction::Updated => "updated",
        }
    }
}

/// The shared locale dictionary, held in memory between load and commit.
pub struct LocaleDictionary {
    path: PathBuf,
    data: Map<String, Value>,
}

impl LocaleDictionary {
    /// Load the dictionary at `path`. A missing file starts empty; existing
    /// content must be a JSON object.
    pub fn open(path: &Path) -> Result<Self, DictionaryError> {
        let data = if path.exists() {
            let content = fs::read_to_string(path).map_err(|source| DictionaryError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let value: Value =
                serde_json::from_str(&content).map_err(|source| DictionaryError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
            match value {
                Value::Object(map) => map,
                _ => {
                    return Err(DictionaryError::NotObject {
                        path: path.to_path_buf(),
                    });
                }
            }
        } else {
            Map::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    /// Set `message_id` to `text`, silently overwriting any prior value.
    pub fn merge(&mut self, message_id: &str, text: &str) -> KeyAction {
        let action = if self.data.contains_key(message_id) {
            KeyAction::Updated
        } else {
            KeyAction::Added
        };
        self.data
            .insert(message_id.to_string(), Value::String(text.to_string()));
        action
    }

    /// Render the dictionary as a 4-space-indented JSON object with a
    /// trailing newline, keys in insertion order.
    pub fn serialize(&self) -> Result<String, DictionaryError> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        self.data
            .serialize(&mut serializer)
            .map_err(|source| DictionaryError::Serialize {
                path: self.path.clone(),
                source,
            })?;
        buffer.push(b'\n');

        String::from_utf8(buffer).map_err(|err| DictionaryError::Serialize {
            path: self.path.clone(),
            source: serde_json::Error::io(io::Error::new(io::ErrorKind::InvalidData, err)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, message_id: &str) -> Option<&str> {
        self.data.get(message_id).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Keys in their stored (insertion) order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }
}
