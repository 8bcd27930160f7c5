//! Rendering helpers for human-readable and shell-readable manifests.

use apkstamp_types::manifest::BuildManifest;

pub fn render_manifest_md(m: &BuildManifest) -> String {
    let mut out = String::new();
    out.push_str(&format!("# apkstamp manifest: {}\n\n", m.project));
    out.push_str(&format!("- Build kind: `{}`\n", m.build_kind));
    out.push_str(&format!("- Version code: `{}`\n", m.version_code));
    out.push_str(&format!("- Version name: `{}`\n", m.version_name));
    out.push_str(&format!("- Version suffix: `{}`\n", m.version_suffix));
    match &m.identity {
        Some(id) => out.push_str(&format!(
            "- Source: commit `{}` ({} commits)\n",
            id.short_hash, id.commit_count
        )),
        None => out.push_str("- Source: _standalone (git metadata unavailable)_\n"),
    }
    if let Some(name) = &m.artifact_name {
        out.push_str(&format!("- Artifact: `{}`\n", name));
    }

    out.push_str("\n## Android\n\n");
    if let Some(ns) = &m.android.namespace {
        out.push_str(&format!("- Namespace: `{}`\n", ns));
    }
    if let Some(id) = &m.android.application_id {
        out.push_str(&format!("- Application id: `{}`\n", id));
    }
    out.push_str(&format!(
        "- SDK: compile {}, min {}, target {}\n",
        m.android.compile_sdk, m.android.min_sdk, m.android.target_sdk
    ));
    out.push_str(&format!("- JVM target: {}\n", m.android.jvm_target));

    out.push_str("\n## Build type\n\n");
    let bt = &m.build_type;
    out.push_str(&format!("- Minify: `{}`\n", bt.minify));
    out.push_str(&format!("- Shrink resources: `{}`\n", bt.shrink_resources));
    out.push_str(&format!("- Crunch PNGs: `{}`\n", bt.crunch_pngs));
    if !bt.proguard_files.is_empty() {
        out.push_str(&format!("- ProGuard files: {}\n", bt.proguard_files.join(", ")));
    }
    match &bt.signing {
        Some(s) => {
            out.push_str(&format!("- Signing: `{}`", s.store_file));
            if let Some(alias) = &s.key_alias {
                out.push_str(&format!(" (alias `{}`)", alias));
            }
            if s.v2_signing {
                out.push_str(", v2");
            }
            out.push('\n');
        }
        None => out.push_str("- Signing: _none_\n"),
    }

    out.push_str("\n## Packaging\n\n");
    if m.packaging.excludes.is_empty() {
        out.push_str("_No resource excludes._\n");
    } else {
        for pattern in &m.packaging.excludes {
            out.push_str(&format!("- exclude `{}`\n", pattern));
        }
    }

    out.push_str(&format!(
        "\n## Lint\n\n- Abort on error: `{}`\n",
        m.lint.abort_on_error
    ));
    out
}

/// `KEY=value` lines for sourcing from a shell or a CI step.
pub fn render_env(m: &BuildManifest) -> String {
    let mut lines = vec![
        format!("APKSTAMP_PROJECT={}", shell_quote(&m.project)),
        format!("APKSTAMP_BUILD_KIND={}", m.build_kind),
        format!("APKSTAMP_VERSION_CODE={}", m.version_code),
        format!("APKSTAMP_VERSION_NAME={}", shell_quote(&m.version_name)),
        format!("APKSTAMP_VERSION_SUFFIX={}", shell_quote(&m.version_suffix)),
    ];
    if let Some(id) = &m.identity {
        lines.push(format!("APKSTAMP_COMMIT_COUNT={}", id.commit_count));
        lines.push(format!("APKSTAMP_SHORT_HASH={}", id.short_hash));
    }
    if let Some(name) = &m.artifact_name {
        lines.push(format!("APKSTAMP_ARTIFACT_NAME={}", shell_quote(name)));
    }
    lines.push(format!(
        "APKSTAMP_SIGNED={}",
        m.build_type.signing.is_some()
    ));
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn shell_quote(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '/' | '+'));
    if plain {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}
