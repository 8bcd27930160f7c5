//! Clap-free settings for the manifest pipeline.

use apkstamp_types::identity::{BuildKind, DEFAULT_SHORT_HASH_LEN};
use apkstamp_types::manifest::{AndroidTarget, LintOptions, PackagingRules, ReleaseOptions};
use camino::Utf8PathBuf;

/// git refuses abbreviations shorter than this.
pub const MIN_SHORT_HASH_LEN: usize = 4;
pub const MAX_SHORT_HASH_LEN: usize = 40;

/// Settings for one stamped variant.
#[derive(Debug, Clone)]
pub struct StampSettings {
    pub repo_root: Utf8PathBuf,
    pub project_name: String,

    /// Static part of the version name, e.g. "3.3.0".
    pub version_name: String,
    pub build_kind: BuildKind,
    pub short_hash_len: usize,

    /// Output file the packager would produce; renamed when it is an `.apk`.
    pub output_file: Option<String>,

    pub android: AndroidTarget,
    pub release: ReleaseOptions,
    pub packaging: PackagingRules,
    pub lint: LintOptions,
}

impl Default for StampSettings {
    fn default() -> Self {
        Self {
            repo_root: Utf8PathBuf::from("."),
            project_name: "app".to_string(),
            version_name: "1.0.0".to_string(),
            build_kind: BuildKind::default(),
            short_hash_len: DEFAULT_SHORT_HASH_LEN,
            output_file: None,
            android: AndroidTarget::default(),
            release: ReleaseOptions::default(),
            packaging: PackagingRules::default(),
            lint: LintOptions::default(),
        }
    }
}

impl StampSettings {
    /// Output name the packager uses when none is configured.
    pub fn default_output_file(kind: BuildKind) -> String {
        format!("app-{kind}.apk")
    }

    pub fn output_file_or_default(&self) -> String {
        self.output_file
            .clone()
            .unwrap_or_else(|| Self::default_output_file(self.build_kind))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.project_name.trim().is_empty() {
            anyhow::bail!("project name must not be empty");
        }
        if self.version_name.trim().is_empty() {
            anyhow::bail!("version name must not be empty");
        }
        if !(MIN_SHORT_HASH_LEN..=MAX_SHORT_HASH_LEN).contains(&self.short_hash_len) {
            anyhow::bail!(
                "short hash length {} out of range {}..={}",
                self.short_hash_len,
                MIN_SHORT_HASH_LEN,
                MAX_SHORT_HASH_LEN
            );
        }
        Ok(())
    }
}
