//! Configuration file loading for apkstamp.
//!
//! Discovers and loads `apkstamp.toml` from the repository root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use apkstamp_core::settings::StampSettings;
use apkstamp_types::identity::{BuildKind, DEFAULT_SHORT_HASH_LEN};
use apkstamp_types::manifest::{AndroidTarget, LintOptions, PackagingRules, ReleaseOptions};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "apkstamp.toml";

/// Used when the repository root has no usable directory name.
pub const DEFAULT_PROJECT_NAME: &str = "app";

/// Used when neither the config nor the CLI names a base version.
pub const DEFAULT_VERSION_NAME: &str = "1.0.0";

/// Top-level configuration from apkstamp.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApkstampConfig {
    pub project: ProjectConfig,
    pub git: GitConfig,
    pub android: AndroidTarget,
    pub release: ReleaseOptions,
    pub packaging: PackagingRules,
    pub lint: LintOptions,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Name used in the packaged output file (default: repo directory name).
    pub name: Option<String>,

    /// Static version name the git suffix is appended to.
    pub version_name: Option<String>,

    /// Output file produced by the packager, e.g. "app-release.apk".
    pub output_file: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// git executable (default: `git` from PATH).
    pub program: Option<String>,

    pub short_hash_len: Option<usize>,
}

/// Discover the apkstamp.toml config file.
///
/// Returns `None` if no config file is found.
pub fn discover_config(repo_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = repo_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse an apkstamp.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<ApkstampConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<ApkstampConfig> {
    let config: ApkstampConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from repo root, or return default if not found.
pub fn load_or_default(repo_root: &Utf8Path) -> anyhow::Result<ApkstampConfig> {
    match discover_config(repo_root) {
        Some(path) => load_config(&path),
        None => Ok(ApkstampConfig::default()),
    }
}

/// Directory name of the repository root, like a build tool's root project name.
pub fn default_project_name(repo_root: &Utf8Path) -> String {
    let resolved = repo_root
        .canonicalize_utf8()
        .unwrap_or_else(|_| repo_root.to_path_buf());
    resolved
        .file_name()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string())
}

/// CLI values that may override the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub repo_root: Utf8PathBuf,
    pub git: Option<String>,
    pub project_name: Option<String>,
    pub version_name: Option<String>,
    pub output_file: Option<String>,
    pub build_kind: BuildKind,
}

/// Settings plus the git program to run them with.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub settings: StampSettings,
    pub git_program: String,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: ApkstampConfig,
}

impl ConfigMerger {
    pub fn new(config: ApkstampConfig) -> Self {
        Self { config }
    }

    /// CLI values win; unset values come from the config file, then defaults.
    pub fn merge(self, cli: &CliOverrides) -> MergedConfig {
        let ApkstampConfig {
            project,
            git,
            android,
            release,
            packaging,
            lint,
        } = self.config;

        let project_name = cli
            .project_name
            .clone()
            .or(project.name)
            .unwrap_or_else(|| default_project_name(&cli.repo_root));
        let version_name = cli
            .version_name
            .clone()
            .or(project.version_name)
            .unwrap_or_else(|| DEFAULT_VERSION_NAME.to_string());

        MergedConfig {
            settings: StampSettings {
                repo_root: cli.repo_root.clone(),
                project_name,
                version_name,
                build_kind: cli.build_kind,
                short_hash_len: git.short_hash_len.unwrap_or(DEFAULT_SHORT_HASH_LEN),
                output_file: cli.output_file.clone().or(project.output_file),
                android,
                release,
                packaging,
                lint,
            },
            git_program: cli
                .git
                .clone()
                .or(git.program)
                .unwrap_or_else(|| "git".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_example_config() {
        let contents = r#"
[project]
name = "TXHook"
version_name = "3.3.0"

[git]
program = "/usr/bin/git"
short_hash_len = 8

[android]
namespace = "moe.ore.txhook"
application_id = "moe.ore.txhook"
compile_sdk = 36
min_sdk = 24
target_sdk = 36
jvm_target = "17"

[release]
minify = true
shrink_resources = true
crunch_pngs = false
proguard_files = ["proguard-rules.pro"]

[packaging]
excludes = ["META-INF/**"]

[lint]
abort_on_error = true
"#;

        let config = parse_config(contents).unwrap();
        assert_eq!(config.project.name.as_deref(), Some("TXHook"));
        assert_eq!(config.project.version_name.as_deref(), Some("3.3.0"));
        assert_eq!(config.git.program.as_deref(), Some("/usr/bin/git"));
        assert_eq!(config.git.short_hash_len, Some(8));
        assert_eq!(config.android.namespace.as_deref(), Some("moe.ore.txhook"));
        assert!(!config.release.crunch_pngs);
        assert_eq!(config.release.proguard_files, vec!["proguard-rules.pro"]);
        assert_eq!(config.packaging.excludes, vec!["META-INF/**"]);
        assert!(config.lint.abort_on_error);
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert!(config.project.name.is_none());
        assert_eq!(config.android.compile_sdk, 36);
        assert!(config.release.minify);
        assert_eq!(config.packaging.excludes.len(), 8);
        assert!(!config.lint.abort_on_error);
    }

    #[test]
    fn test_parse_invalid_config() {
        let err = parse_config("[git]\nshort_hash_len = \"seven\"\n").unwrap_err();
        assert!(format!("{err:#}").contains("invalid TOML"));
    }

    #[test]
    fn test_merge_cli_overrides_config() {
        let config = parse_config(
            r#"
[project]
name = "FromConfig"
version_name = "2.0.0"
output_file = "app.aab"

[git]
program = "config-git"
"#,
        )
        .unwrap();
        let cli = CliOverrides {
            repo_root: Utf8PathBuf::from("."),
            git: Some("cli-git".to_string()),
            project_name: Some("FromCli".to_string()),
            version_name: None,
            output_file: Some("app-release.apk".to_string()),
            build_kind: BuildKind::Release,
        };

        let merged = ConfigMerger::new(config).merge(&cli);
        assert_eq!(merged.git_program, "cli-git");
        assert_eq!(merged.settings.project_name, "FromCli");
        assert_eq!(merged.settings.version_name, "2.0.0");
        assert_eq!(merged.settings.output_file.as_deref(), Some("app-release.apk"));
        assert_eq!(merged.settings.build_kind, BuildKind::Release);
    }

    #[test]
    fn test_merge_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().join("MyModule")).expect("utf8");
        std::fs::create_dir_all(&root).expect("mkdir");

        let cli = CliOverrides {
            repo_root: root,
            ..Default::default()
        };
        let merged = ConfigMerger::new(ApkstampConfig::default()).merge(&cli);
        assert_eq!(merged.git_program, "git");
        assert_eq!(merged.settings.project_name, "MyModule");
        assert_eq!(merged.settings.version_name, DEFAULT_VERSION_NAME);
        assert_eq!(merged.settings.short_hash_len, 7);
        assert_eq!(merged.settings.output_file, None);
    }

    #[test]
    fn test_discover_config_some_and_none() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        assert!(discover_config(&root).is_none());

        std::fs::write(root.join(CONFIG_FILE_NAME), "").expect("write config");
        assert!(discover_config(&root).is_some());
    }

    #[test]
    fn test_load_or_default_returns_default_when_missing() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let cfg = load_or_default(&root).expect("load default");
        assert!(cfg.project.version_name.is_none());
        assert!(cfg.git.program.is_none());
    }
}
