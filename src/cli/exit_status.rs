use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed (including the silent nothing-to-extract no-op)
/// - `Failure` (1): Command completed but refused to act (missing config, existing file)
/// - `Error` (2): Command failed due to internal error (parse error, IO error, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed successfully.
    Success,
    /// Command completed but refused to act.
    Failure,
    /// Command failed due to internal error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
