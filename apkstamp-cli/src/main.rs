mod config;

use anyhow::Context;
use apkstamp_core::adapters::{FsWritePort, ProcessEnv, ShellGitPort};
use apkstamp_core::artifact::output_file_name;
use apkstamp_core::pipeline::{run_manifest, write_manifest_artifacts};
use apkstamp_core::resolver::VersionResolver;
use apkstamp_render::{render_env, render_manifest_md};
use apkstamp_types::identity::BuildKind;
use apkstamp_types::manifest::ToolInfo;
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use config::{CliOverrides, ConfigMerger, MergedConfig};
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "apkstamp",
    version,
    about = "Git-derived version codes and version names for Android builds."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// Repository root (default: current directory).
    #[arg(long, default_value = ".", global = true)]
    repo_root: Utf8PathBuf,

    /// git executable to run (default: `git` from PATH).
    #[arg(long, global = true)]
    git: Option<String>,

    /// Project name used in the packaged output name (default: repo directory name).
    #[arg(long, global = true)]
    project_name: Option<String>,

    /// Static version name the git suffix is appended to.
    #[arg(long, global = true)]
    version_name: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the version code (commit count, or 1 without git).
    VersionCode,
    /// Print the version suffix, e.g. r42.abc1234 (or .standalone).
    Suffix(KindArgs),
    /// Print the full version name.
    VersionName(KindArgs),
    /// Print the packaged output file name.
    ArtifactName(ArtifactNameArgs),
    /// Resolve the full build manifest and optionally write it to disk.
    Manifest(ManifestArgs),
}

#[derive(Debug, Args)]
struct KindArgs {
    /// Build variant (debug, release).
    #[arg(long, default_value = "debug")]
    kind: BuildKind,
}

#[derive(Debug, Args)]
struct ArtifactNameArgs {
    #[command(flatten)]
    kind: KindArgs,

    /// Output file produced by the packager (default: app-<kind>.apk).
    #[arg(long)]
    output: Option<String>,
}

#[derive(Debug, Args)]
struct ManifestArgs {
    #[command(flatten)]
    kind: KindArgs,

    /// Output file produced by the packager (default: app-<kind>.apk).
    #[arg(long)]
    output: Option<String>,

    /// Directory to write build-manifest.json, build-manifest.md and version.env into.
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Output format for stdout (text, json, env).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Env,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout carries the values build scripts read.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();
    let global = cli.global;
    match cli.cmd {
        Command::VersionCode => cmd_version_code(global),
        Command::Suffix(args) => cmd_suffix(global, args),
        Command::VersionName(args) => cmd_version_name(global, args),
        Command::ArtifactName(args) => cmd_artifact_name(global, args),
        Command::Manifest(args) => cmd_manifest(global, args),
    }
}

fn load_merged(
    global: GlobalArgs,
    kind: BuildKind,
    output_file: Option<String>,
) -> anyhow::Result<MergedConfig> {
    let file_config =
        config::load_or_default(&global.repo_root).context("load apkstamp.toml config")?;
    let merged = ConfigMerger::new(file_config).merge(&CliOverrides {
        repo_root: global.repo_root,
        git: global.git,
        project_name: global.project_name,
        version_name: global.version_name,
        output_file,
        build_kind: kind,
    });
    merged.settings.validate()?;

    debug!(
        "merged config: project={}, version_name={}, git={}, short_hash_len={}",
        merged.settings.project_name,
        merged.settings.version_name,
        merged.git_program,
        merged.settings.short_hash_len
    );
    Ok(merged)
}

fn cmd_version_code(global: GlobalArgs) -> anyhow::Result<()> {
    let merged = load_merged(global, BuildKind::default(), None)?;
    let git = ShellGitPort::new(merged.git_program);
    let resolver = VersionResolver::new(merged.settings.repo_root, &git)
        .with_short_hash_len(merged.settings.short_hash_len);
    println!("{}", resolver.resolve_commit_count());
    Ok(())
}

fn cmd_suffix(global: GlobalArgs, args: KindArgs) -> anyhow::Result<()> {
    let kind = args.kind;
    let merged = load_merged(global, kind, None)?;
    let git = ShellGitPort::new(merged.git_program);
    let resolver = VersionResolver::new(merged.settings.repo_root, &git)
        .with_short_hash_len(merged.settings.short_hash_len);
    println!("{}", resolver.resolve_version_suffix(kind));
    Ok(())
}

fn cmd_version_name(global: GlobalArgs, args: KindArgs) -> anyhow::Result<()> {
    let kind = args.kind;
    let merged = load_merged(global, kind, None)?;
    let git = ShellGitPort::new(merged.git_program);
    let resolver = VersionResolver::new(merged.settings.repo_root, &git)
        .with_short_hash_len(merged.settings.short_hash_len);
    println!(
        "{}",
        resolver.resolve_version_name(&merged.settings.version_name, kind)
    );
    Ok(())
}

fn cmd_artifact_name(global: GlobalArgs, args: ArtifactNameArgs) -> anyhow::Result<()> {
    let kind = args.kind.kind;
    let merged = load_merged(global, kind, args.output)?;
    let settings = merged.settings;
    let git = ShellGitPort::new(merged.git_program);
    let resolver = VersionResolver::new(settings.repo_root.clone(), &git)
        .with_short_hash_len(settings.short_hash_len);

    let version_name = resolver.resolve_version_name(&settings.version_name, kind);
    let current = settings.output_file_or_default();
    let name = output_file_name(&settings.project_name, &version_name, &current)
        .unwrap_or(current);
    println!("{}", name);
    Ok(())
}

fn cmd_manifest(global: GlobalArgs, args: ManifestArgs) -> anyhow::Result<()> {
    let kind = args.kind.kind;
    let merged = load_merged(global, kind, args.output)?;
    let git = ShellGitPort::new(merged.git_program);

    let outcome = run_manifest(&merged.settings, &git, &ProcessEnv, tool_info())
        .context("resolve build manifest")?;

    if let Some(out_dir) = &args.out_dir {
        write_manifest_artifacts(&outcome, out_dir, &FsWritePort)
            .with_context(|| format!("write manifest to {}", out_dir))?;
    }

    match args.format {
        OutputFormat::Text => print!("{}", render_manifest_md(&outcome.manifest)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&outcome.manifest).context("serialize manifest")?
        ),
        OutputFormat::Env => print!("{}", render_env(&outcome.manifest)),
    }
    Ok(())
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "apkstamp".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
