//! VersionResolver over real git repositories.

use apkstamp_core::adapters::{InMemoryEnv, ShellGitPort};
use apkstamp_core::pipeline::run_manifest;
use apkstamp_core::resolver::VersionResolver;
use apkstamp_core::settings::StampSettings;
use apkstamp_core::{BuildKind, FALLBACK_SUFFIX, FALLBACK_VERSION_CODE, GitError};
use apkstamp_types::manifest::ToolInfo;
use camino::{Utf8Path, Utf8PathBuf};
use pretty_assertions::assert_eq;
use std::process::Command;
use tempfile::TempDir;

fn run_git(root: &Utf8Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args([
            "-c",
            "user.email=test@example.com",
            "-c",
            "user.name=Test User",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(root)
        .output()
        .expect("run git");
    assert!(output.status.success(), "git {:?} failed", args);
    String::from_utf8(output.stdout).expect("utf8").trim().to_string()
}

fn repo_with_commits(n: usize) -> (TempDir, Utf8PathBuf) {
    let temp = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
    run_git(&root, &["init", "-q"]);
    for i in 0..n {
        let msg = format!("commit {i}");
        run_git(&root, &["commit", "-q", "--allow-empty", "-m", &msg]);
    }
    (temp, root)
}

#[test]
fn suffix_matches_git_state() {
    let (_temp, root) = repo_with_commits(5);
    let expected_hash = run_git(&root, &["rev-parse", "--short=7", "HEAD"]);

    let git = ShellGitPort::default();
    let resolver = VersionResolver::new(root.clone(), &git);

    assert_eq!(resolver.resolve_commit_count(), 5);
    let hash = resolver.resolve_short_hash().expect("hash");
    assert_eq!(hash, expected_hash);
    assert_eq!(hash.len(), 7);
    assert_eq!(
        resolver.resolve_version_suffix(BuildKind::Release),
        format!("r5.{expected_hash}")
    );
    assert_eq!(
        resolver.resolve_version_suffix(BuildKind::Debug),
        format!("d5.{expected_hash}")
    );
}

#[test]
fn commit_count_grows_with_history() {
    let (_temp, root) = repo_with_commits(2);
    let git = ShellGitPort::default();

    let before = VersionResolver::new(root.clone(), &git).resolve_commit_count();
    run_git(&root, &["commit", "-q", "--allow-empty", "-m", "next"]);
    let after = VersionResolver::new(root.clone(), &git).resolve_commit_count();

    assert_eq!(before, 2);
    assert_eq!(after, 3);
}

#[test]
fn missing_repository_uses_fallbacks() {
    let temp = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
    let git = ShellGitPort::default();
    let resolver = VersionResolver::new(root, &git);

    assert_eq!(resolver.resolve_commit_count(), FALLBACK_VERSION_CODE);
    assert_eq!(resolver.resolve_version_suffix(BuildKind::Debug), FALLBACK_SUFFIX);
    assert_eq!(resolver.resolve_version_suffix(BuildKind::Release), FALLBACK_SUFFIX);
}

#[test]
fn missing_git_executable_uses_fallbacks() {
    let (_temp, root) = repo_with_commits(1);
    let git = ShellGitPort::new(root.join("no-such-git").to_string());
    let resolver = VersionResolver::new(root, &git);

    assert_eq!(resolver.resolve_commit_count(), 1);
    assert_eq!(resolver.resolve_version_suffix(BuildKind::Release), ".standalone");

    let err = resolver.identity(BuildKind::Release).unwrap_err();
    assert!(matches!(err, GitError::Spawn { .. }), "got {err:?}");
    assert!(err.to_string().contains("no-such-git"));
}

#[test]
fn repository_without_commits_uses_fallbacks() {
    let (_temp, root) = repo_with_commits(0);
    let git = ShellGitPort::default();
    let resolver = VersionResolver::new(root, &git);

    assert_eq!(resolver.resolve_commit_count(), 1);
    assert_eq!(resolver.resolve_version_suffix(BuildKind::Debug), ".standalone");
}

#[test]
fn repeated_resolution_is_identical() {
    let (_temp, root) = repo_with_commits(3);
    let git = ShellGitPort::default();

    let a = VersionResolver::new(root.clone(), &git).resolve(BuildKind::Release);
    let b = VersionResolver::new(root.clone(), &git).resolve(BuildKind::Release);
    assert_eq!(a, b);
}

#[test]
fn manifest_pipeline_over_real_repo() {
    let (_temp, root) = repo_with_commits(4);
    let hash = run_git(&root, &["rev-parse", "--short=7", "HEAD"]);
    let settings = StampSettings {
        repo_root: root,
        project_name: "TXHook".to_string(),
        version_name: "3.3.0".to_string(),
        build_kind: BuildKind::Release,
        ..Default::default()
    };
    let tool = ToolInfo {
        name: "apkstamp".to_string(),
        version: None,
    };

    let m = run_manifest(&settings, &ShellGitPort::default(), &InMemoryEnv::default(), tool)
        .expect("manifest")
        .manifest;
    assert_eq!(m.version_code, 4);
    assert_eq!(m.version_name, format!("3.3.0.r4.{hash}"));
    assert_eq!(
        m.artifact_name,
        Some(format!("TXHook-v3.3.0.r4.{hash}.APK"))
    );
}
