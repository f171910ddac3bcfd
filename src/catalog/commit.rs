//! Staged two-file commit.
//!
//! An extraction rewrites two documents that must stay referentially
//! consistent: the component's definitions file and the shared locale
//! dictionary. Each new content is written to a temp file in the destination
//! directory and moved into place with a rename. The second rename is only
//! attempted once the first has succeeded; if the second write fails, the
//! first file is restored to its pre-commit content so the pair is updated
//! together or not at all.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::{fs, io};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommitError {
    #[error("failed to stage {}: {source}", path.display())]
    Stage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to commit {}: {source}", path.display())]
    Commit {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{source}; the earlier write to {} was rolled back", first_path.display())]
    RolledBack {
        first_path: PathBuf,
        #[source]
        source: Box<CommitError>,
    },
    #[error(
        "{source}; the earlier write to {} could not be rolled back: {rollback_error}",
        first_path.display()
    )]
    RollbackFailed {
        first_path: PathBuf,
        #[source]
        source: Box<CommitError>,
        rollback_error: io::Error,
    },
}

/// Full replacement content for one file.
pub struct StagedWrite {
    pub path: PathBuf,
    pub content: String,
}

impl StagedWrite {
    pub fn new(path: impl Into<PathBuf>, content: String) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }
}

/// Commit both writes, or neither.
pub fn commit_both(first: StagedWrite, second: StagedWrite) -> Result<(), CommitError> {
    // Snapshot the first file before touching it so a failed second write
    // can be undone.
    let first_snapshot = match fs::read_to_string(&first.path) {
        Ok(content) => Some(content),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => {
            return Err(CommitError::Stage {
                path: first.path,
                source: err,
            });
        }
    };

    write_via_rename(&first)?;

    if let Err(err) = write_via_rename(&second) {
        return Err(match roll_back(&first.path, first_snapshot) {
            Ok(()) => CommitError::RolledBack {
                first_path: first.path,
                source: Box::new(err),
            },
            Err(rollback_error) => CommitError::RollbackFailed {
                first_path: first.path,
                source: Box::new(err),
                rollback_error,
            },
        });
    }

    Ok(())
}

fn write_via_rename(write: &StagedWrite) -> Result<(), CommitError> {
    let stage_error = |source: io::Error| CommitError::Stage {
        path: write.path.clone(),
        source,
    };

    let parent = match write.path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(stage_error)?;

    // Stage in the destination directory so the rename stays on one
    // filesystem.
    let mut staged = NamedTempFile::new_in(parent).map_err(stage_error)?;
    staged
        .write_all(write.content.as_bytes())
        .map_err(stage_error)?;

    staged
        .persist(&write.path)
        .map_err(|err| CommitError::Commit {
            path: write.path.clone(),
            source: err.error,
        })?;

    Ok(())
}

fn roll_back(path: &Path, snapshot: Option<String>) -> Result<(), io::Error> {
    match snapshot {
        Some(content) => fs::write(path, content),
        None => fs::remove_file(path),
    }
}
