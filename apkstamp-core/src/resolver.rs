//! Version code and version suffix derived from git, with fallbacks.
//!
//! Resolution never fails: a missing `.git/HEAD`, a git executable that
//! cannot be started, a non-zero exit or unparsable output all produce the
//! same fallback values plus a warning. Each git query runs at most once per
//! [`VersionResolver`]; later calls reuse the first outcome.

use apkstamp_git::{GitPort, GitResult, require_git_metadata};
use apkstamp_types::identity::{
    BuildIdentity, BuildKind, DEFAULT_SHORT_HASH_LEN, FALLBACK_SUFFIX, FALLBACK_VERSION_CODE,
    compose_version_name,
};
use camino::Utf8PathBuf;
use std::cell::OnceCell;
use tracing::{debug, warn};

/// Version values for one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub version_code: u32,
    pub suffix: String,
    pub identity: Option<BuildIdentity>,
}

pub struct VersionResolver<'a> {
    repo_root: Utf8PathBuf,
    git: &'a dyn GitPort,
    short_hash_len: usize,
    commit_count: OnceCell<GitResult<u32>>,
    short_hash: OnceCell<GitResult<String>>,
}

impl<'a> VersionResolver<'a> {
    pub fn new(repo_root: impl Into<Utf8PathBuf>, git: &'a dyn GitPort) -> Self {
        Self {
            repo_root: repo_root.into(),
            git,
            short_hash_len: DEFAULT_SHORT_HASH_LEN,
            commit_count: OnceCell::new(),
            short_hash: OnceCell::new(),
        }
    }

    pub fn with_short_hash_len(mut self, len: usize) -> Self {
        self.short_hash_len = len;
        self
    }

    fn commit_count_outcome(&self) -> &GitResult<u32> {
        self.commit_count.get_or_init(|| {
            require_git_metadata(&self.repo_root)?;
            let count = self.git.commit_count(&self.repo_root)?;
            debug!(count, "resolved git commit count");
            Ok(count)
        })
    }

    fn short_hash_outcome(&self) -> &GitResult<String> {
        self.short_hash.get_or_init(|| {
            require_git_metadata(&self.repo_root)?;
            let hash = self.git.short_hash(&self.repo_root, self.short_hash_len)?;
            debug!(%hash, "resolved git short hash");
            Ok(hash)
        })
    }

    /// Commits reachable from HEAD, or [`FALLBACK_VERSION_CODE`].
    pub fn resolve_commit_count(&self) -> u32 {
        match self.commit_count_outcome() {
            Ok(count) => *count,
            Err(e) => {
                warn!(
                    error = %e,
                    fallback = FALLBACK_VERSION_CODE,
                    "failed to get git commit count"
                );
                FALLBACK_VERSION_CODE
            }
        }
    }

    /// Abbreviated HEAD hash. No fallback of its own.
    pub fn resolve_short_hash(&self) -> GitResult<String> {
        self.short_hash_outcome().clone()
    }

    /// Both git queries, or the first error met.
    pub fn identity(&self, kind: BuildKind) -> GitResult<BuildIdentity> {
        let count = self.commit_count_outcome().clone()?;
        let hash = self.resolve_short_hash()?;
        Ok(BuildIdentity::new(count, hash, kind))
    }

    /// `{prefix}{count}.{hash}`, or [`FALLBACK_SUFFIX`].
    pub fn resolve_version_suffix(&self, kind: BuildKind) -> String {
        match self.identity(kind) {
            Ok(identity) => identity.suffix(),
            Err(e) => {
                warn!(error = %e, fallback = FALLBACK_SUFFIX, "failed to get git info");
                FALLBACK_SUFFIX.to_string()
            }
        }
    }

    pub fn resolve_version_name(&self, base: &str, kind: BuildKind) -> String {
        compose_version_name(base, &self.resolve_version_suffix(kind))
    }

    pub fn resolve(&self, kind: BuildKind) -> ResolvedVersion {
        ResolvedVersion {
            version_code: self.resolve_commit_count(),
            suffix: self.resolve_version_suffix(kind),
            identity: self.identity(kind).ok(),
        }
    }
}
