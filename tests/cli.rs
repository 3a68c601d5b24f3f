mod common;

use assert_cmd::Command;
use common::create_fixture;
use predicates::prelude::*;
use std::path::MAIN_SEPARATOR;

fn treecursor() -> Command {
    let mut cmd = Command::cargo_bin("treecursor").unwrap();
    cmd.env_remove("TREECURSOR_LOG");
    cmd
}

#[test]
fn test_help_flag() {
    treecursor()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resumable directory tree traverser"))
        .stdout(predicate::str::contains("--dirs-only"))
        .stdout(predicate::str::contains("--files-only"))
        .stdout(predicate::str::contains("--match"))
        .stdout(predicate::str::contains("--all"))
        .stdout(predicate::str::contains("--step"))
        .stdout(predicate::str::contains("Examples:"));
}

#[test]
fn test_version_flag() {
    treecursor()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("treecursor"));
}

#[test]
fn test_nonexistent_path_exits_with_error() {
    treecursor()
        .arg("/this/path/does/not/exist")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such file"));
}

#[test]
fn test_file_path_exits_with_error() {
    let tmp = create_fixture(&["afile.txt"]);
    treecursor()
        .arg(tmp.path().join("afile.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a directory"));
}

#[test]
fn test_invalid_pattern_exits_with_error() {
    let tmp = create_fixture(&[]);
    treecursor()
        .arg(tmp.path())
        .args(["-m", "[oops"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid glob pattern"));
}

#[test]
fn test_files_only_lists_matching_files() {
    let tmp = create_fixture(&["a.jpg", "b.png", "sub/c.jpg", ".hidden/d.jpg"]);
    let expected = format!(
        "{}\n{}\n",
        tmp.path().join("a.jpg").display(),
        tmp.path().join("sub/c.jpg").display()
    );
    treecursor()
        .arg(tmp.path())
        .args(["-f", "-m", "*.jpg"])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_all_flag_includes_hidden() {
    let tmp = create_fixture(&[".hidden/d.jpg"]);
    treecursor()
        .arg(tmp.path())
        .args(["-f", "-a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("d.jpg"));
}

#[test]
fn test_dirs_only_marks_directories() {
    let tmp = create_fixture(&["sub/a.txt"]);
    let sub = format!("{}{}", tmp.path().join("sub").display(), MAIN_SEPARATOR);
    treecursor()
        .arg(tmp.path())
        .arg("-d")
        .assert()
        .success()
        .stdout(predicate::str::contains(sub))
        .stdout(predicate::str::contains("a.txt").not());
}

#[test]
fn test_null_separated_output() {
    let tmp = create_fixture(&["a.txt", "b.txt"]);
    let expected = format!(
        "{}\0{}\0",
        tmp.path().join("a.txt").display(),
        tmp.path().join("b.txt").display()
    );
    treecursor()
        .arg(tmp.path())
        .args(["-f", "-0"])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_level_limits_depth() {
    let tmp = create_fixture(&["top.txt", "sub/deep.txt"]);
    treecursor()
        .arg(tmp.path())
        .args(["-f", "-L", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("top.txt"))
        .stdout(predicate::str::contains("deep.txt").not());
}

#[test]
fn test_step_requires_terminal() {
    let tmp = create_fixture(&[]);
    treecursor()
        .arg(tmp.path())
        .arg("--step")
        .assert()
        .failure()
        .stderr(predicate::str::contains("interactive terminal"));
}

#[test]
fn test_dirs_only_conflicts_with_files_only() {
    treecursor().args(["-d", "-f"]).assert().failure();
}
