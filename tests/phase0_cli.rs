mod common;

use assert_cmd::Command;
use common::create_fixture;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn projectmap() -> Command {
    let mut cmd = Command::cargo_bin("projectmap").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_flag() {
    projectmap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ASCII listing"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--collapse"))
        .stdout(predicate::str::contains("--trees-dir"))
        .stdout(predicate::str::contains("--interactive"))
        .stdout(predicate::str::contains("--quiet"))
        .stdout(predicate::str::contains("Examples:"));
}

#[test]
fn test_version_flag() {
    projectmap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("projectmap"));
}

#[test]
fn test_nonexistent_path_exits_with_error() {
    projectmap()
        .args(["--stdout", "/this/path/does/not/exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read root"));
}

#[test]
fn test_stdout_prints_listing() {
    let tmp = create_fixture(&["app/B/", "app/A/x.txt", "app/z.txt"]);
    let root = tmp.path().join("app");
    let expected = format!(
        "ROOT: {}\napp/\n├─ A/\n│  └─ x.txt\n├─ B\n└─ z.txt\n",
        root.display()
    );
    projectmap()
        .arg("--stdout")
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::ends_with(expected))
        .stdout(predicate::str::starts_with("   [×] - "));
}

#[test]
fn test_collapse_patterns_applied() {
    let tmp = create_fixture(&["app/node_modules/pkg/index.js", "app/src/main.rs", "app/.git/HEAD"]);
    let root = tmp.path().join("app");
    projectmap()
        .args(["--stdout", "--collapse-common", "-x", "src"])
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("[×] .git/"))
        .stdout(predicate::str::contains("[×] node_modules/"))
        .stdout(predicate::str::contains("[×] src/"))
        .stdout(predicate::str::contains("index.js").not())
        .stdout(predicate::str::contains("main.rs").not());
}

#[test]
fn test_saves_to_explicit_output() {
    let tmp = create_fixture(&["app/readme.md"]);
    let out = TempDir::new().unwrap();
    let dest = out.path().join("map.txt");
    projectmap()
        .arg("-o")
        .arg(&dest)
        .arg(tmp.path().join("app"))
        .assert()
        .success()
        .stderr(predicate::str::contains("saved"));

    let text = fs::read_to_string(&dest).unwrap();
    assert!(text.ends_with("app/\n└─ readme.md"));
}

#[test]
fn test_refuses_to_overwrite_output() {
    let tmp = create_fixture(&["app/readme.md"]);
    let out = TempDir::new().unwrap();
    let dest = out.path().join("map.txt");
    fs::write(&dest, "keep me").unwrap();

    projectmap()
        .arg("-o")
        .arg(&dest)
        .arg(tmp.path().join("app"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&dest).unwrap(), "keep me");
}

#[test]
fn test_default_destination_in_trees_dir() {
    let tmp = create_fixture(&["app/readme.md"]);
    let out = TempDir::new().unwrap();
    let trees = out.path().join("Trees");
    projectmap()
        .arg("--trees-dir")
        .arg(&trees)
        .arg(tmp.path().join("app"))
        .assert()
        .success();

    let saved: Vec<String> = fs::read_dir(&trees)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].starts_with("app "), "{saved:?}");
    assert!(saved[0].ends_with(".txt"));
}

#[test]
fn test_quiet_suppresses_saved_notice() {
    let tmp = create_fixture(&["app/readme.md"]);
    let out = TempDir::new().unwrap();
    projectmap()
        .arg("-q")
        .arg("-o")
        .arg(out.path().join("t.txt"))
        .arg(tmp.path().join("app"))
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_stdout_conflicts_with_output() {
    projectmap()
        .args(["--stdout", "-o", "x.txt", "."])
        .assert()
        .failure();
}

#[test]
fn test_multiple_collapse_patterns() {
    use clap::Parser;
    use projectmap::cli::Args;
    let args = Args::parse_from(["projectmap", "-x", "*.egg-info", "-x", "build", "."]);
    assert_eq!(args.collapse, vec!["*.egg-info", "build"]);
}

#[test]
fn test_default_trees_dir() {
    use clap::Parser;
    use projectmap::cli::Args;
    let args = Args::parse_from(["projectmap"]);
    assert_eq!(args.trees_dir, std::path::PathBuf::from("Trees"));
    assert_eq!(args.path, std::path::PathBuf::from("."));
}

#[test]
fn test_quiet_resets_verbose() {
    use clap::Parser;
    use projectmap::cli::Args;
    let args = Args::parse_from(["projectmap", "-vv", "--quiet", "."]).validated();
    assert!(args.quiet);
    assert_eq!(args.verbose, 0, "quiet should reset verbosity to 0");
    assert_eq!(args.log_level(), "error");
}

#[test]
fn test_log_levels_follow_verbosity() {
    use clap::Parser;
    use projectmap::cli::Args;
    assert_eq!(Args::parse_from(["projectmap"]).log_level(), "warn");
    assert_eq!(Args::parse_from(["projectmap", "-v"]).log_level(), "info");
    assert_eq!(Args::parse_from(["projectmap", "-vvv"]).log_level(), "trace");
    assert_eq!(Args::parse_from(["projectmap", "-i"]).log_level(), "off");
}

#[test]
fn test_browser_never_logs_to_stderr() {
    use clap::Parser;
    use projectmap::cli::{Args, LogDestination};
    let log = std::env::temp_dir().join("projectmap.log");

    assert_eq!(Args::parse_from(["projectmap", "-v"]).log_destination(false), None);
    assert_eq!(
        Args::parse_from(["projectmap", "-i"]).log_destination(false),
        Some(LogDestination::Discard)
    );
    assert_eq!(
        Args::parse_from(["projectmap", "-i", "-v"]).log_destination(false),
        Some(LogDestination::File(log.clone()))
    );
    assert_eq!(
        Args::parse_from(["projectmap", "-i"]).log_destination(true),
        Some(LogDestination::File(log))
    );
    assert_eq!(
        Args::parse_from(["projectmap", "-i", "--log-file", "x.log"]).log_destination(false),
        Some(LogDestination::File(std::path::PathBuf::from("x.log")))
    );
}

#[test]
fn test_log_file_receives_logs() {
    let tmp = create_fixture(&["app/readme.md"]);
    let log = tmp.path().join("run.log");
    projectmap()
        .args(["-v", "--stdout", "--log-file"])
        .arg(&log)
        .arg(tmp.path().join("app"))
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
    assert!(fs::read_to_string(&log).unwrap().contains("scan complete"));
}
