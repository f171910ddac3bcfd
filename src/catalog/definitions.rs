//! The per-component definitions document.
//!
//! A definitions file is a constrained, machine-maintained template:
//!
//! ```text
//! import { defineMessages } from 'react-intl';
//!
//! const messages = defineMessages({
//! 	<name>: {
//! 		id: '<id>',
//! 		defaultMessage: '<id>',
//! 	},
//! });
//!
//! export default messages;
//! ```
//!
//! Instead of splicing lines at a magic offset from the end of the file, the
//! document is parsed into `{ preamble, entry blocks, postamble }` on load and
//! rendered back on save. Parsing and re-rendering an untouched document is
//! byte-identical, and a file that no longer matches the template grammar
//! fails with [`DefinitionsError::Malformed`] instead of being corrupted.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::{fs, io};

use regex::Regex;
use thiserror::Error;

use crate::catalog::entry::{MessageEntry, escape_single_quoted, unescape_single_quoted};

/// Seed content for a component's first extraction.
pub const DEFINITIONS_TEMPLATE: &str = "import { defineMessages } from 'react-intl';\n\nconst messages = defineMessages({\n});\n\nexport default messages;\n";

static ENTRY_OPEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\t([A-Za-z_$][A-Za-z0-9_$]*): \{$").unwrap());
static ID_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\t\tid: '((?:[^'\\]|\\.)*)',$").unwrap());
static DEFAULT_MESSAGE_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\t\tdefaultMessage: '((?:[^'\\]|\\.)*)',$").unwrap());

const DECLARATION_OPEN: &str = "const messages = defineMessages({";
const DECLARATION_CLOSE: &str = "});";
const ENTRY_CLOSE: &str = "\t},";

#[derive(Debug, Error)]
pub enum DefinitionsError {
    #[error("failed to read definitions file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed definitions document {} at line {line}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("cannot derive a component name from {}", path.display())]
    NoComponentName { path: PathBuf },
}

/// One parsed entry block.
///
/// The quoted values are kept exactly as written so that re-rendering an
/// existing document reproduces it byte for byte, escapes included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryBlock {
    variable_name: String,
    raw_id: String,
    raw_default_message: String,
}

impl EntryBlock {
    fn from_entry(entry: &MessageEntry) -> Self {
        let raw_id = escape_single_quoted(&entry.message_id);
        Self {
            variable_name: entry.variable_name.clone(),
            // defaultMessage echoes the id; the human-readable text lives
            // only in the locale dictionary.
            raw_default_message: raw_id.clone(),
            raw_id,
        }
    }

    fn lines(&self) -> [String; 4] {
        [
            format!("\t{}: {{", self.variable_name),
            format!("\t\tid: '{}',", self.raw_id),
            format!("\t\tdefaultMessage: '{}',", self.raw_default_message),
            ENTRY_CLOSE.to_string(),
        ]
    }

    pub fn variable_name(&self) -> &str {
        &self.variable_name
    }

    pub fn message_id(&self) -> String {
        unescape_single_quoted(&self.raw_id)
    }
}

/// A loaded definitions document: fixed boilerplate around an ordered
/// sequence of entry blocks.
#[derive(Debug, Clone)]
pub struct DefinitionsDocument {
    path: PathBuf,
    preamble: Vec<String>,
    blocks: Vec<EntryBlock>,
    postamble: Vec<String>,
    trailing_newline: bool,
    created: bool,
}

/// Deterministic definitions path for a component directory:
/// `<dir>/<basename(dir)>.messages.<ext>`.
pub fn definitions_path(component_dir: &Path, ext: &str) -> Result<PathBuf, DefinitionsError> {
    let component_name = component_dir
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| DefinitionsError::NoComponentName {
            path: component_dir.to_path_buf(),
        })?;
    Ok(component_dir.join(format!("{}.messages.{}", component_name, ext)))
}

impl DefinitionsDocument {
    /// Load the document at `path`, seeding it from the template if the file
    /// does not exist yet. Existing files are parsed as-is and never
    /// re-seeded, so re-opening is a no-op until an entry is pushed.
    pub fn open_or_create(path: &Path) -> Result<Self, DefinitionsError> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|source| DefinitionsError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Self::parse(path, &content)
        } else {
            let mut document = Self::parse(path, DEFINITIONS_TEMPLATE)?;
            document.created = true;
            Ok(document)
        }
    }

    /// Parse document text against the template grammar.
    pub fn parse(path: &Path, content: &str) -> Result<Self, DefinitionsError> {
        let malformed = |line: usize, reason: &str| DefinitionsError::Malformed {
            path: path.to_path_buf(),
            line,
            reason: reason.to_string(),
        };

        let mut lines: Vec<&str> = content.split('\n').collect();
        // A trailing newline shows up as one final empty segment.
        let trailing_newline = lines.last() == Some(&"");
        if trailing_newline {
            lines.pop();
        }

        let open_index = lines
            .iter()
            .position(|line| *line == DECLARATION_OPEN)
            .ok_or_else(|| malformed(1, "missing `const messages = defineMessages({` opener"))?;

        let preamble: Vec<String> = lines[..=open_index].iter().map(|s| s.to_string()).collect();

        let mut blocks = Vec::new();
        let mut index = open_index + 1;
        loop {
            let Some(&line) = lines.get(index) else {
                return Err(malformed(lines.len(), "unterminated defineMessages block"));
            };
            if line == DECLARATION_CLOSE {
                break;
            }
            if line.is_empty() {
                // Separator between entry blocks; never before the first
                // entry or the closing punctuation.
                if blocks.is_empty() {
                    return Err(malformed(index + 1, "blank line before first entry"));
                }
                index += 1;
                if lines.get(index).is_none_or(|next| *next == DECLARATION_CLOSE) {
                    return Err(malformed(index + 1, "blank line without a following entry"));
                }
                continue;
            }

            let variable_name = ENTRY_OPEN_REGEX
                .captures(line)
                .map(|caps| caps[1].to_string())
                .ok_or_else(|| malformed(index + 1, "expected an entry opener `\\t<name>: {`"))?;
            let raw_id = lines
                .get(index + 1)
                .and_then(|line| ID_LINE_REGEX.captures(line))
                .map(|caps| caps[1].to_string())
                .ok_or_else(|| malformed(index + 2, "expected an `id: '...'` line"))?;
            let raw_default_message = lines
                .get(index + 2)
                .and_then(|line| DEFAULT_MESSAGE_LINE_REGEX.captures(line))
                .map(|caps| caps[1].to_string())
                .ok_or_else(|| malformed(index + 3, "expected a `defaultMessage: '...'` line"))?;
            if lines.get(index + 3) != Some(&ENTRY_CLOSE) {
                return Err(malformed(index + 4, "expected the entry closer `\\t},`"));
            }

            blocks.push(EntryBlock {
                variable_name,
                raw_id,
                raw_default_message,
            });
            index += 4;
        }

        let postamble: Vec<String> = lines[index..].iter().map(|s| s.to_string()).collect();

        Ok(Self {
            path: path.to_path_buf(),
            preamble,
            blocks,
            postamble,
            trailing_newline,
            created: false,
        })
    }

    /// Append an entry as the last block before the closing punctuation.
    pub fn push_entry(&mut self, entry: &MessageEntry) {
        self.blocks.push(EntryBlock::from_entry(entry));
    }

    /// Render the document back to text.
    ///
    /// Entry blocks are separated by exactly one blank line; the first block
    /// follows the declaration opener directly.
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = self.preamble.clone();
        for (index, block) in self.blocks.iter().enumerate() {
            if index > 0 {
                lines.push(String::new());
            }
            lines.extend(block.lines());
        }
        lines.extend(self.postamble.iter().cloned());

        let mut content = lines.join("\n");
        if self.trailing_newline {
            content.push('\n');
        }
        content
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if this document was seeded from the template rather than read
    /// from disk.
    pub fn is_new(&self) -> bool {
        self.created
    }

    pub fn blocks(&self) -> &[EntryBlock] {
        &self.blocks
    }
}
