//! Error types for apkstamp-git.
//!
//! Every variant ends in the same place (the resolver's fallback); the
//! variants exist so the diagnostic says what actually went wrong.

use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GitError {
    /// `.git/HEAD` is absent under the repository root.
    #[error("git HEAD file not found at {path}")]
    MissingMetadata { path: Utf8PathBuf },

    /// The git executable could not be started.
    #[error("failed to run {program}: {message}")]
    Spawn { program: String, message: String },

    /// git ran and exited unsuccessfully.
    #[error("`{command}` exited with {}: {stderr}", exit_label(.code))]
    NonZeroExit {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// git succeeded but printed something unexpected.
    #[error("`{command}` produced unexpected output {output:?}: {message}")]
    Parse {
        command: String,
        output: String,
        message: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl GitError {
    /// Returns true if the repository marker was missing (git never ran).
    pub fn is_missing_metadata(&self) -> bool {
        matches!(self, GitError::MissingMetadata { .. })
    }
}

pub type GitResult<T> = Result<T, GitError>;
