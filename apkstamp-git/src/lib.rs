//! Git queries used to derive a build identity.
//!
//! Responsibilities:
//! - Check for the `.git/HEAD` marker under a repository root.
//! - Count commits reachable from HEAD and abbreviate the HEAD hash.
//!
//! All queries go through [`GitPort`] so callers can swap in a stub.
//! [`ShellGitPort`] runs the real `git` executable: synchronously, once,
//! without retries.

mod error;

pub use error::{GitError, GitResult};

use camino::{Utf8Path, Utf8PathBuf};
use std::process::Command;
use tracing::debug;

/// Relative location of the marker whose presence gates every git query.
pub const HEAD_MARKER: &str = ".git/HEAD";

/// Git queries needed for versioning.
pub trait GitPort {
    /// Number of commits reachable from HEAD, inclusive.
    fn commit_count(&self, repo_root: &Utf8Path) -> GitResult<u32>;

    /// HEAD's hash abbreviated to (at least) `len` hex characters.
    fn short_hash(&self, repo_root: &Utf8Path, len: usize) -> GitResult<String>;
}

pub fn head_marker(repo_root: &Utf8Path) -> Utf8PathBuf {
    repo_root.join(HEAD_MARKER)
}

/// Existence check only; the file's contents are left to git.
pub fn has_git_metadata(repo_root: &Utf8Path) -> bool {
    head_marker(repo_root).is_file()
}

/// Fails with [`GitError::MissingMetadata`] when the marker is absent.
pub fn require_git_metadata(repo_root: &Utf8Path) -> GitResult<()> {
    if has_git_metadata(repo_root) {
        Ok(())
    } else {
        Err(GitError::MissingMetadata {
            path: head_marker(repo_root),
        })
    }
}

/// Runs the git executable found on `PATH` (or an explicit program path).
#[derive(Debug, Clone)]
pub struct ShellGitPort {
    program: String,
}

impl Default for ShellGitPort {
    fn default() -> Self {
        Self::new("git")
    }
}

impl ShellGitPort {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run git with `args` in `repo_root` and return trimmed stdout.
    fn run(&self, repo_root: &Utf8Path, args: &[&str]) -> GitResult<String> {
        let command = format!("{} {}", self.program, args.join(" "));
        debug!(%command, root = %repo_root, "running git");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(repo_root)
            .output()
            .map_err(|e| GitError::Spawn {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(GitError::NonZeroExit {
                command,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout)
            .map(|s| s.trim().to_string())
            .map_err(|e| GitError::Parse {
                command,
                output: String::from_utf8_lossy(e.as_bytes()).into_owned(),
                message: "output is not valid UTF-8".to_string(),
            })
    }
}

impl GitPort for ShellGitPort {
    fn commit_count(&self, repo_root: &Utf8Path) -> GitResult<u32> {
        let args = ["rev-list", "--count", "HEAD"];
        let out = self.run(repo_root, &args)?;
        parse_commit_count(&out).map_err(|message| GitError::Parse {
            command: format!("{} {}", self.program, args.join(" ")),
            output: out.clone(),
            message,
        })
    }

    fn short_hash(&self, repo_root: &Utf8Path, len: usize) -> GitResult<String> {
        let short = format!("--short={len}");
        let args = ["rev-parse", short.as_str(), "HEAD"];
        let out = self.run(repo_root, &args)?;
        validate_short_hash(&out).map_err(|message| GitError::Parse {
            command: format!("{} {}", self.program, args.join(" ")),
            output: out.clone(),
            message,
        })?;
        Ok(out)
    }
}

/// Parse `git rev-list --count` output.
pub fn parse_commit_count(output: &str) -> Result<u32, String> {
    output.trim().parse::<u32>().map_err(|e| e.to_string())
}

/// Accept a non-empty run of lowercase hex digits.
pub fn validate_short_hash(hash: &str) -> Result<(), String> {
    if hash.is_empty() {
        return Err("empty hash".to_string());
    }
    if !hash
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    {
        return Err("hash is not lowercase hex".to_string());
    }
    Ok(())
}
