//! Message entry data and quoting helpers.
//!
//! A `MessageEntry` is one extracted fragment: the variable name it is
//! reachable under in the definitions file, the message id used as the
//! dictionary key, and the default text stored in the locale dictionary.

use std::sync::LazyLock;

use regex::Regex;

static VARIABLE_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// One extracted message: variable name, message id, default text.
///
/// Created transiently per extraction and persisted immediately into the
/// definitions document and the locale dictionary; no long-lived model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    /// Key within the definitions document (`messages.<variable_name>`).
    pub variable_name: String,
    /// Dotted-path message id, the locale dictionary key.
    pub message_id: String,
    /// The extracted fragment; lives only in the locale dictionary.
    pub default_text: String,
}

impl MessageEntry {
    pub fn new(
        variable_name: impl Into<String>,
        message_id: impl Into<String>,
        default_text: impl Into<String>,
    ) -> Self {
        Self {
            variable_name: variable_name.into(),
            message_id: message_id.into(),
            default_text: default_text.into(),
        }
    }
}

/// Check that a variable name is usable as a bare object key.
pub fn is_valid_variable_name(name: &str) -> bool {
    VARIABLE_NAME_REGEX.is_match(name)
}

/// Escape a string for embedding in a single-quoted JS literal.
///
/// Besides quotes and backslashes, control characters that would break the
/// one-line entry grammar are escaped too.
pub fn escape_single_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Inverse of [`escape_single_quoted`].
pub fn unescape_single_quoted(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => unescaped.push('\n'),
                Some('r') => unescaped.push('\r'),
                Some('t') => unescaped.push('\t'),
                Some(next) => unescaped.push(next),
                None => unescaped.push('\\'),
            }
        } else {
            unescaped.push(ch);
        }
    }
    unescaped
}
