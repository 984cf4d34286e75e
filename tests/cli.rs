//! Integration tests for the page-composer binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn write_project(root: &Path) {
    fs::create_dir_all(root.join("templates")).unwrap();
    fs::create_dir_all(root.join("partials/home")).unwrap();
    fs::write(
        root.join("templates/home.template.html"),
        "<body>\n  {{> footer}}\n  {{> missing}}\n</body>\n",
    )
    .unwrap();
    fs::write(
        root.join("partials/home/footer.html"),
        "  <p>Hi</p>\n\n  <p>Bye</p>\n",
    )
    .unwrap();
    fs::write(root.join("partials/home/sidebar.html"), "<aside/>").unwrap();
}

fn composer() -> Command {
    Command::cargo_bin("page-composer").unwrap()
}

#[test]
fn test_builds_default_layout_under_root() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());

    composer()
        .arg("--root")
        .arg(dir.path())
        .assert()
        .success()
        .stdout("Built home.html from template using 1 partials.\n");

    assert_eq!(
        fs::read_to_string(dir.path().join("home.html")).unwrap(),
        "<body>\n  <p>Hi</p>\n\n  <p>Bye</p>\n  {{> missing}}\n</body>\n"
    );
}

#[test]
fn test_missing_inputs_exit_nonzero() {
    let dir = tempfile::tempdir().unwrap();

    composer()
        .arg("--root")
        .arg(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error: not found"))
        .stderr(predicate::str::contains("home.template.html"));

    assert!(!dir.path().join("home.html").exists());
}

#[test]
fn test_no_arguments_ignore_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());

    // Paths are fixed to the tool's own project, not the caller's directory
    let expected = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("templates/home.template.html")
        .display()
        .to_string();
    composer()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(expected));

    assert!(!dir.path().join("home.html").exists());
}

#[test]
fn test_stdout_does_not_write_file() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());

    composer()
        .arg("--root")
        .arg(dir.path())
        .arg("--stdout")
        .assert()
        .success()
        .stdout("<body>\n  <p>Hi</p>\n\n  <p>Bye</p>\n  {{> missing}}\n</body>\n");

    assert!(!dir.path().join("home.html").exists());
}

#[test]
fn test_check_reports_warnings_without_failing() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());

    composer()
        .arg("--root")
        .arg(dir.path())
        .arg("--check")
        .assert()
        .success()
        .stderr(predicate::str::contains("no partial named 'missing'"))
        .stderr(predicate::str::contains("partial 'sidebar'"));
}

#[test]
fn test_silent_without_check() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());

    composer()
        .arg("--root")
        .arg(dir.path())
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_config_file_sets_root() {
    let dir = tempfile::tempdir().unwrap();
    write_project(&dir.path().join("site"));
    fs::write(dir.path().join("composer.toml"), "[paths]\nroot = \"site\"\n").unwrap();

    composer()
        .arg("--config")
        .arg(dir.path().join("composer.toml"))
        .assert()
        .success();

    assert!(dir.path().join("site/home.html").exists());
}

#[test]
fn test_bad_config_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("composer.toml"), "[compose]\nmode = 3\n").unwrap();

    composer()
        .current_dir(dir.path())
        .args(["--config", "composer.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error loading config"));
}

#[test]
fn test_mode_all_flag() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("templates")).unwrap();
    fs::create_dir_all(dir.path().join("partials/home")).unwrap();
    fs::write(
        dir.path().join("templates/home.template.html"),
        "{{> hr}}\n{{> hr}}",
    )
    .unwrap();
    fs::write(dir.path().join("partials/home/hr.html"), "<hr>").unwrap();

    composer()
        .arg("--root")
        .arg(dir.path())
        .args(["--mode", "all", "--stdout"])
        .assert()
        .success()
        .stdout("<hr>\n<hr>");
}
