//! CLI integration tests for the `tgrid render` command.
//!
//! Covers explicit file lists, directory discovery by run prefix,
//! sequence files, per-file failure isolation, and JSON progress output.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Run tgrid render in `cwd` and return (stdout, stderr, exit code).
fn run_render(cwd: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_tgrid"))
        .current_dir(cwd)
        .env("XDG_CONFIG_HOME", cwd)
        .arg("render")
        .args(args)
        .output()
        .expect("Failed to execute tgrid");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.code().unwrap_or(-1))
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

const L_PIECE: &str = "1 1 1\n1 0 0 \n\n";

// ============================================================================
// Explicit files
// ============================================================================

#[test]
fn test_render_single_file() {
    let dir = tempfile::TempDir::new().unwrap();
    write_file(dir.path(), "run_2x3_grid_output.txt", L_PIECE);

    let (stdout, stderr, code) = run_render(dir.path(), &["run_2x3_grid_output.txt"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("run_2x3_grid_output.png"));

    let img = image::open(dir.path().join("run_2x3_grid_output.png")).unwrap();
    assert_eq!((img.width(), img.height()), (48, 32));
}

#[test]
fn test_render_cell_size_flag() {
    let dir = tempfile::TempDir::new().unwrap();
    write_file(dir.path(), "a.txt", "1 2\n");

    let (_, stderr, code) = run_render(dir.path(), &["a.txt", "--cell-size", "5"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    let img = image::open(dir.path().join("a.png")).unwrap();
    assert_eq!((img.width(), img.height()), (10, 5));
}

#[test]
fn test_render_out_dir() {
    let dir = tempfile::TempDir::new().unwrap();
    write_file(dir.path(), "a.txt", "1\n");

    let (_, stderr, code) = run_render(dir.path(), &["a.txt", "-o", "pngs"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(dir.path().join("pngs/a.png").exists());
}

#[test]
fn test_render_malformed_file_does_not_stop_others() {
    let dir = tempfile::TempDir::new().unwrap();
    write_file(dir.path(), "bad.txt", "1 2\n3\n");
    write_file(dir.path(), "good.txt", "1 1\n");

    let (_, stderr, code) = run_render(dir.path(), &["bad.txt", "good.txt"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("line 2: expected 2 values, found 1"), "stderr: {}", stderr);
    assert!(dir.path().join("good.png").exists());
    assert!(!dir.path().join("bad.png").exists());
}

#[test]
fn test_render_missing_file_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let (_, _, code) = run_render(dir.path(), &["nope.txt"]);
    assert_eq!(code, 1);
}

#[test]
fn test_render_size_mismatch_warns() {
    let dir = tempfile::TempDir::new().unwrap();
    write_file(dir.path(), "run_5x5_grid_output.txt", L_PIECE);

    let (_, stderr, code) = run_render(dir.path(), &["run_5x5_grid_output.txt"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("file name says 5x5 but grid is 2x3"), "stderr: {}", stderr);
}

// ============================================================================
// Sequences
// ============================================================================

#[test]
fn test_render_sequence_writes_one_image_per_step() {
    let dir = tempfile::TempDir::new().unwrap();
    write_file(
        dir.path(),
        "run_1x2_grid_output_intermediate.txt",
        "0 0 \n\n1 0 \n\n1 1 \n\n",
    );

    let (stdout, stderr, code) = run_render(dir.path(), &["run_1x2_grid_output_intermediate.txt"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    for step in 0..3 {
        let name = format!("run_1x2_grid_output_intermediate_step_{}.png", step);
        assert!(dir.path().join(&name).exists(), "missing {}", name);
        assert!(stdout.contains(&name));
    }
}

#[test]
fn test_render_sequence_flag_on_plain_name() {
    let dir = tempfile::TempDir::new().unwrap();
    write_file(dir.path(), "steps.txt", "1\n\n2\n");

    let (_, stderr, code) = run_render(dir.path(), &["steps.txt", "--sequence"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(dir.path().join("steps_step_0.png").exists());
    assert!(dir.path().join("steps_step_1.png").exists());
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn test_render_discovers_by_prefix() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = dir.path().join("output");
    std::fs::create_dir(&output).unwrap();
    write_file(&output, "alpha_2x3_grid_output.txt", L_PIECE);
    write_file(&output, "beta_1x1_grid_output.txt", "1\n");
    write_file(&output, "notes.txt", "not a grid");

    let (_, stderr, code) = run_render(dir.path(), &["--prefix", "alpha"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(output.join("alpha_2x3_grid_output.png").exists());
    assert!(!output.join("beta_1x1_grid_output.png").exists());
    assert!(!output.join("notes.png").exists());
}

#[test]
fn test_render_discovers_in_dir() {
    let dir = tempfile::TempDir::new().unwrap();
    let grids = dir.path().join("grids");
    std::fs::create_dir(&grids).unwrap();
    write_file(&grids, "a_1x1_grid_output.txt", "1\n");
    write_file(&grids, "b_1x1_grid_output.txt", "2\n");

    let (stdout, stderr, code) = run_render(dir.path(), &["--dir", "grids"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(stdout.lines().count(), 2);
}

#[test]
fn test_render_no_matches_is_invalid_args() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("output")).unwrap();

    let (_, stderr, code) = run_render(dir.path(), &["--prefix", "ghost"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("ghost"));
}

#[test]
fn test_render_missing_dir_is_invalid_args() {
    let dir = tempfile::TempDir::new().unwrap();
    let (_, _, code) = run_render(dir.path(), &["--dir", "absent"]);
    assert_eq!(code, 2);
}

// ============================================================================
// Config and progress
// ============================================================================

#[test]
fn test_render_reads_config_file() {
    let dir = tempfile::TempDir::new().unwrap();
    write_file(dir.path(), "tgrid.toml", "[render]\ncell_size = 4\n");
    write_file(dir.path(), "a.txt", "1 1 1\n");

    let (_, stderr, code) = run_render(dir.path(), &["a.txt"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    let img = image::open(dir.path().join("a.png")).unwrap();
    assert_eq!((img.width(), img.height()), (12, 4));
}

#[test]
fn test_render_invalid_config_is_invalid_args() {
    let dir = tempfile::TempDir::new().unwrap();
    write_file(dir.path(), "tgrid.toml", "[render]\ncell_size = 0\n");
    write_file(dir.path(), "a.txt", "1\n");

    let (_, stderr, code) = run_render(dir.path(), &["a.txt"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("cell_size"), "stderr: {}", stderr);
}

#[test]
fn test_render_json_progress() {
    let dir = tempfile::TempDir::new().unwrap();
    write_file(dir.path(), "a.txt", "1\n");

    let (stdout, stderr, code) = run_render(dir.path(), &["a.txt", "--json"]);
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    let events: Vec<serde_json::Value> =
        stderr.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(events.first().unwrap()["event"], "batch_started");
    assert_eq!(events.last().unwrap()["event"], "batch_completed");
    assert_eq!(events.last().unwrap()["succeeded"], 1);
}
