use crate::identity::{BuildIdentity, BuildKind};
use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Android compile/target levels for the module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AndroidTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,

    pub compile_sdk: u32,
    pub min_sdk: u32,
    pub target_sdk: u32,

    /// JVM bytecode target for Java and Kotlin sources, e.g. "17".
    pub jvm_target: String,
}

impl Default for AndroidTarget {
    fn default() -> Self {
        Self {
            namespace: None,
            application_id: None,
            compile_sdk: 36,
            min_sdk: 24,
            target_sdk: 36,
            jvm_target: "17".to_string(),
        }
    }
}

/// Shrinking and optimization switches for release builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseOptions {
    pub minify: bool,
    pub shrink_resources: bool,
    pub crunch_pngs: bool,
    pub proguard_files: Vec<String>,
}

impl Default for ReleaseOptions {
    fn default() -> Self {
        Self {
            minify: true,
            shrink_resources: true,
            crunch_pngs: true,
            proguard_files: vec![
                "proguard-android-optimize.txt".to_string(),
                "proguard-rules.pro".to_string(),
            ],
        }
    }
}

/// Signing details safe to write to disk. Secrets are reduced to presence flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningSummary {
    pub store_file: Utf8PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_alias: Option<String>,

    pub has_store_password: bool,
    pub has_key_password: bool,
    pub v2_signing: bool,
}

/// Effective settings of the build type being produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTypeProfile {
    pub build_kind: BuildKind,
    pub minify: bool,
    pub shrink_resources: bool,
    pub crunch_pngs: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub proguard_files: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing: Option<SigningSummary>,
}

impl BuildTypeProfile {
    /// Debug builds never shrink or sign; release builds take `release`.
    pub fn for_kind(kind: BuildKind, release: &ReleaseOptions) -> Self {
        match kind {
            BuildKind::Debug => Self {
                build_kind: kind,
                minify: false,
                shrink_resources: false,
                crunch_pngs: false,
                proguard_files: Vec::new(),
                signing: None,
            },
            BuildKind::Release => Self {
                build_kind: kind,
                minify: release.minify,
                shrink_resources: release.shrink_resources,
                crunch_pngs: release.crunch_pngs,
                proguard_files: release.proguard_files.clone(),
                signing: None,
            },
        }
    }
}

/// Resource paths dropped from the packaged artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagingRules {
    pub excludes: Vec<String>,
}

impl Default for PackagingRules {
    fn default() -> Self {
        Self {
            excludes: [
                "META-INF/**",
                "kotlin/**",
                "google/**",
                "org/**",
                "WEB-INF/**",
                "okhttp3/**",
                "DebugProbesKt.bin",
                "kotlin-tooling-metadata.json",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintOptions {
    pub abort_on_error: bool,
}

/// Everything a build script needs to stamp one variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildManifest {
    pub schema: String,
    pub tool: ToolInfo,
    pub generated_at: DateTime<Utc>,

    pub project: String,
    pub build_kind: BuildKind,
    pub version_code: u32,
    pub version_name: String,
    pub version_suffix: String,

    /// Absent when git state was unavailable and fallbacks were used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<BuildIdentity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_name: Option<String>,

    pub android: AndroidTarget,
    pub build_type: BuildTypeProfile,
    pub packaging: PackagingRules,
    pub lint: LintOptions,
}

impl BuildManifest {
    /// True when the version values came from the fallback path.
    pub fn is_standalone(&self) -> bool {
        self.identity.is_none()
    }
}
