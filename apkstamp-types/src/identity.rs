use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Version code used when git state cannot be read.
pub const FALLBACK_VERSION_CODE: u32 = 1;

/// Version suffix used when git state cannot be read.
pub const FALLBACK_SUFFIX: &str = ".standalone";

/// Default abbreviation length for the HEAD commit hash.
pub const DEFAULT_SHORT_HASH_LEN: usize = 7;

/// Which build variant is being produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildKind {
    #[default]
    Debug,
    Release,
}

impl BuildKind {
    /// One-character marker placed in front of the commit count.
    pub fn prefix(self) -> char {
        match self {
            BuildKind::Debug => 'd',
            BuildKind::Release => 'r',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BuildKind::Debug => "debug",
            BuildKind::Release => "release",
        }
    }
}

impl fmt::Display for BuildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBuildKind(pub String);

impl fmt::Display for UnknownBuildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown build kind '{}' (expected debug or release)", self.0)
    }
}

impl std::error::Error for UnknownBuildKind {}

impl FromStr for BuildKind {
    type Err = UnknownBuildKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildKind::Debug),
            "release" => Ok(BuildKind::Release),
            _ => Err(UnknownBuildKind(s.to_string())),
        }
    }
}

/// Build provenance derived from the repository HEAD.
///
/// Only constructed when both git queries succeed; the fallback path has no
/// identity at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildIdentity {
    /// Commits reachable from HEAD, inclusive. Doubles as the version code.
    pub commit_count: u32,

    /// Abbreviated hex id of HEAD.
    pub short_hash: String,

    pub build_kind: BuildKind,
}

impl BuildIdentity {
    pub fn new(commit_count: u32, short_hash: impl Into<String>, build_kind: BuildKind) -> Self {
        Self {
            commit_count,
            short_hash: short_hash.into(),
            build_kind,
        }
    }

    /// `{prefix}{commit_count}.{short_hash}`, e.g. `r1532.a1b2c3d`.
    pub fn suffix(&self) -> String {
        format!(
            "{}{}.{}",
            self.build_kind.prefix(),
            self.commit_count,
            self.short_hash
        )
    }
}

/// Join a base version name and a suffix with exactly one `.`.
///
/// Suffixes that already carry a leading dot (the fallback does) are not
/// doubled.
pub fn compose_version_name(base: &str, suffix: &str) -> String {
    let suffix = suffix.trim_start_matches('.');
    if suffix.is_empty() {
        return base.to_string();
    }
    format!("{base}.{suffix}")
}
