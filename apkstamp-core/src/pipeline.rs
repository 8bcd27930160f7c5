//! Manifest pipeline.
//!
//! These entry points are I/O-agnostic: git, environment and filesystem
//! access go through the port traits.

use crate::artifact::output_file_name;
use crate::ports::{EnvPort, GitPort, WritePort};
use crate::resolver::VersionResolver;
use crate::settings::StampSettings;
use crate::signing::resolve_signing;
use anyhow::Context;
use apkstamp_render::{render_env, render_manifest_md};
use apkstamp_types::identity::compose_version_name;
use apkstamp_types::manifest::{BuildManifest, BuildTypeProfile, ToolInfo};
use apkstamp_types::schema;
use camino::Utf8Path;
use chrono::Utc;
use tracing::{debug, info};

pub const MANIFEST_JSON: &str = "build-manifest.json";
pub const MANIFEST_MD: &str = "build-manifest.md";
pub const VERSION_ENV: &str = "version.env";

/// Outcome of `run_manifest`.
#[derive(Debug, Clone)]
pub struct ManifestOutcome {
    pub manifest: BuildManifest,
}

/// Resolve everything needed to stamp one variant.
///
/// git is queried at most once per query; failures fall back and are logged,
/// so only invalid settings make this return an error.
pub fn run_manifest(
    settings: &StampSettings,
    git: &dyn GitPort,
    env: &dyn EnvPort,
    tool: ToolInfo,
) -> anyhow::Result<ManifestOutcome> {
    settings.validate().context("invalid stamp settings")?;

    let kind = settings.build_kind;
    let resolver = VersionResolver::new(settings.repo_root.clone(), git)
        .with_short_hash_len(settings.short_hash_len);
    let resolved = resolver.resolve(kind);

    let version_name = compose_version_name(&settings.version_name, &resolved.suffix);
    let output = settings.output_file_or_default();
    let artifact_name = output_file_name(&settings.project_name, &version_name, &output);
    if artifact_name.is_none() {
        debug!(%output, "output is not an apk, keeping its name");
    }

    let mut build_type = BuildTypeProfile::for_kind(kind, &settings.release);
    build_type.signing =
        resolve_signing(kind, env, &settings.repo_root).map(|cfg| cfg.summary());

    info!(
        project = %settings.project_name,
        %kind,
        version_code = resolved.version_code,
        %version_name,
        "resolved build manifest"
    );

    Ok(ManifestOutcome {
        manifest: BuildManifest {
            schema: schema::APKSTAMP_MANIFEST_V1.to_string(),
            tool,
            generated_at: Utc::now(),
            project: settings.project_name.clone(),
            build_kind: kind,
            version_code: resolved.version_code,
            version_name,
            version_suffix: resolved.suffix,
            identity: resolved.identity,
            artifact_name,
            android: settings.android.clone(),
            build_type,
            packaging: settings.packaging.clone(),
            lint: settings.lint.clone(),
        },
    })
}

/// Write `build-manifest.json`, `build-manifest.md` and `version.env` into `out_dir`.
pub fn write_manifest_artifacts(
    outcome: &ManifestOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer
        .create_dir_all(out_dir)
        .with_context(|| format!("create {}", out_dir))?;

    let json = serde_json::to_string_pretty(&outcome.manifest).context("serialize manifest")?;
    writer.write_file(&out_dir.join(MANIFEST_JSON), json.as_bytes())?;
    writer.write_file(
        &out_dir.join(MANIFEST_MD),
        render_manifest_md(&outcome.manifest).as_bytes(),
    )?;
    writer.write_file(
        &out_dir.join(VERSION_ENV),
        render_env(&outcome.manifest).as_bytes(),
    )?;

    info!("wrote manifest to {}", out_dir);
    Ok(())
}
