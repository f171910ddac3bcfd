//! The extraction orchestrator.
//!
//! Drives one end-to-end extraction: derive the component from the source
//! file path, append the entry to the definitions document, merge the locale
//! dictionary, commit both files together, and compose the replacement
//! reference expression for the caller to splice into the source.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::catalog::commit::{self, CommitError, StagedWrite};
use crate::catalog::definitions::{self, DefinitionsDocument, DefinitionsError};
use crate::catalog::dictionary::{DictionaryError, KeyAction, LocaleDictionary};
use crate::catalog::entry::{MessageEntry, is_valid_variable_name};

/// Shape of the reference expression substituted for the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `{messages.<name>}`
    Plain,
    /// `<FormattedMessage {...messages.<name>} />`
    Tagged,
}

impl ReferenceKind {
    /// The literal text around the variable name in the replacement.
    fn parts(&self) -> (&'static str, &'static str) {
        match self {
            ReferenceKind::Plain => ("{messages.", "}"),
            ReferenceKind::Tagged => ("<FormattedMessage {...messages.", "} />"),
        }
    }

    /// Replacement expression for `variable_name`.
    pub fn replacement(&self, variable_name: &str) -> String {
        let (prefix, suffix) = self.parts();
        format!("{}{}{}", prefix, variable_name, suffix)
    }

    /// Where an editor should leave the cursor inside the replacement: at
    /// the start of the variable name. Computed from the replacement text,
    /// never hardcoded.
    pub fn cursor_offset(&self) -> usize {
        self.parts().0.len()
    }

    /// Confirmation notice for a successful extraction.
    pub fn notice(&self) -> &'static str {
        match self {
            ReferenceKind::Plain => "Message extracted.",
            ReferenceKind::Tagged => "FormattedMessage extracted.",
        }
    }
}

/// All inputs of one extraction, collected by the caller up front so that an
/// abort never leaves a partial write behind.
#[derive(Debug)]
pub struct ExtractionRequest<'a> {
    /// The selected fragment. Empty means nothing to extract.
    pub selected_text: &'a str,
    /// The source file the selection came from; its parent directory is the
    /// component directory.
    pub source_file: &'a Path,
    pub variable_name: &'a str,
    pub message_id: &'a str,
    pub reference: ReferenceKind,
    /// The shared locale dictionary path, resolved by the caller.
    pub locale_file: &'a Path,
    /// Extension of the definitions file (`ts` by default).
    pub messages_extension: &'a str,
}

/// Outcome of a completed extraction.
#[derive(Debug)]
pub struct Extraction {
    pub variable_name: String,
    /// Expression to substitute for the selection.
    pub replacement: String,
    /// Byte offset of the variable name within `replacement`.
    pub cursor_offset: usize,
    pub definitions_path: PathBuf,
    /// True if the definitions file was seeded by this extraction.
    pub definitions_created: bool,
    pub dictionary_action: KeyAction,
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("`{0}` is not a valid variable name")]
    InvalidVariableName(String),
    #[error("{} has no parent directory to use as the component", .0.display())]
    NoComponentDir(PathBuf),
    #[error(transparent)]
    Definitions(#[from] DefinitionsError),
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
    #[error(transparent)]
    Commit(#[from] CommitError),
}

/// Run one extraction. Returns `Ok(None)` when there is nothing to extract
/// (empty selection, name, or id) without touching any file.
pub fn extract(request: &ExtractionRequest) -> Result<Option<Extraction>, ExtractError> {
    if request.selected_text.is_empty()
        || request.variable_name.is_empty()
        || request.message_id.is_empty()
    {
        return Ok(None);
    }
    if !is_valid_variable_name(request.variable_name) {
        return Err(ExtractError::InvalidVariableName(
            request.variable_name.to_string(),
        ));
    }

    let component_dir = request
        .source_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .ok_or_else(|| ExtractError::NoComponentDir(request.source_file.to_path_buf()))?;
    let definitions_file = definitions::definitions_path(component_dir, request.messages_extension)?;

    let mut document = DefinitionsDocument::open_or_create(&definitions_file)?;
    let entry = MessageEntry::new(
        request.variable_name,
        request.message_id,
        request.selected_text,
    );
    document.push_entry(&entry);

    let mut dictionary = LocaleDictionary::open(request.locale_file)?;
    let dictionary_action = dictionary.merge(request.message_id, request.selected_text);

    // Both documents parsed and updated in memory; only now touch disk.
    commit::commit_both(
        StagedWrite::new(&definitions_file, document.render()),
        StagedWrite::new(request.locale_file, dictionary.serialize()?),
    )?;

    Ok(Some(Extraction {
        variable_name: request.variable_name.to_string(),
        replacement: request.reference.replacement(request.variable_name),
        cursor_offset: request.reference.cursor_offset(),
        definitions_path: definitions_file,
        definitions_created: document.is_new(),
        dictionary_action,
    }))
}
