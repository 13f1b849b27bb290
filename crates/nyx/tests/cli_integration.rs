//! End-to-end CLI integration tests: a temporary Git repository drives
//! the real pipeline commands through the compiled binary.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn nyx_bin() -> std::path::PathBuf {
    if let Ok(bin) = std::env::var("CARGO_BIN_EXE_nyx") {
        return std::path::PathBuf::from(bin);
    }

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR")).parent().unwrap().parent().unwrap();
    let candidates = [
        workspace_root.join("target/release/nyx"),
        workspace_root.join("target/debug/nyx"),
    ];
    for candidate in &candidates {
        if candidate.exists() {
            return candidate.clone();
        }
    }

    let status = Command::new("cargo")
        .args(["build", "-p", "nyx"])
        .current_dir(workspace_root)
        .status()
        .expect("failed to build nyx binary");
    assert!(status.success(), "failed to build nyx");
    workspace_root.join("target/debug/nyx")
}

fn setup_git_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let dir = temp_dir.path();
    Command::new("git").args(["init"]).current_dir(dir).output().unwrap();
    Command::new("git").args(["config", "user.email", "test@example.com"]).current_dir(dir).output().unwrap();
    Command::new("git").args(["config", "user.name", "Test User"]).current_dir(dir).output().unwrap();
    temp_dir
}

fn git_commit(dir: &Path, message: &str) {
    Command::new("git").args(["add", "."]).current_dir(dir).output().unwrap();
    Command::new("git").args(["commit", "-m", message]).current_dir(dir).output().unwrap();
}

#[test]
fn infer_reports_minor_bump_for_feature_commit() {
    let temp_dir = setup_git_repo();
    let dir = temp_dir.path();

    fs::write(dir.join("README.md"), "hello").unwrap();
    git_commit(dir, "feat: add widget");

    let output = Command::new(nyx_bin()).args(["infer"]).current_dir(dir).output().unwrap();

    assert!(output.status.success(), "infer should succeed: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0.2.0"), "expected inferred version 0.2.0: {stdout}");
    assert!(stdout.contains("bump: minor"), "expected minor bump: {stdout}");
}

#[test]
fn infer_dry_run_does_not_persist_state() {
    let temp_dir = setup_git_repo();
    let dir = temp_dir.path();

    fs::write(dir.join("README.md"), "hello").unwrap();
    git_commit(dir, "fix: patch a bug");

    let output = Command::new(nyx_bin()).args(["--dry-run", "infer"]).current_dir(dir).output().unwrap();

    assert!(output.status.success(), "infer --dry-run should succeed: {}", String::from_utf8_lossy(&output.stderr));
    assert!(!dir.join(".nyx-state.json").exists(), "dry run must not write a state file");
}

#[test]
fn clean_removes_the_state_file() {
    let temp_dir = setup_git_repo();
    let dir = temp_dir.path();

    fs::write(dir.join("README.md"), "hello").unwrap();
    git_commit(dir, "feat: add widget");

    Command::new(nyx_bin()).args(["infer"]).current_dir(dir).output().unwrap();
    assert!(dir.join(".nyx-state.json").exists());

    let output = Command::new(nyx_bin()).args(["clean"]).current_dir(dir).output().unwrap();
    assert!(output.status.success());
    assert!(!dir.join(".nyx-state.json").exists());
}

#[test]
fn breaking_change_triggers_major_bump() {
    let temp_dir = setup_git_repo();
    let dir = temp_dir.path();

    fs::write(dir.join("api.rs"), "// v1").unwrap();
    git_commit(dir, "feat!: breaking API change");

    let output = Command::new(nyx_bin()).args(["infer"]).current_dir(dir).output().unwrap();

    assert!(output.status.success(), "infer should succeed: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("bump: major"), "expected major bump: {stdout}");
}

#[test]
fn version_and_help_flags_work() {
    let output = Command::new(nyx_bin()).args(["--version"]).output().unwrap();
    assert!(output.status.success());

    let output = Command::new(nyx_bin()).args(["--help"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("infer"));
    assert!(stdout.contains("release"));
}
