use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

const PORTFOLIO: &str = r#"
owner = "Test Owner"
nav = ["Home", "Projects"]
about = "Hello."

[[projects]]
title = "First Piece"
id = "piece1"
video_url = "https://www.youtube.com/embed/abc123"

[[projects]]
title = "Second Piece"
id = "piece2"
"#;

#[test]
fn test_projects_lists_builtin_portfolio() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["projects"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project2"))
        .stdout(predicate::str::contains("project6"))
        .stdout(predicate::str::contains("VIDEO"));
}

#[test]
fn test_projects_json() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("mine.toml");
    fs::write(&file, PORTFOLIO).unwrap();

    let output = cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["--content", file.to_str().unwrap(), "projects", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let projects: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let projects = projects.as_array().unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0]["id"], "piece1");
    assert_eq!(
        projects[1]["description"],
        "Details and description of the project: Second Piece"
    );
}

#[test]
fn test_portfolio_in_folio_home_is_used() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("portfolio.toml"), PORTFOLIO).unwrap();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["projects"])
        .assert()
        .success()
        .stdout(predicate::str::contains("First Piece"))
        .stdout(predicate::str::contains("CyberDolls").not());
}

#[test]
fn test_validate_accepts_good_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("mine.toml");
    fs::write(&file, PORTFOLIO).unwrap();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["validate", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok (2 navigation buttons, 2 projects"));
}

#[test]
fn test_validate_rejects_duplicate_ids() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("dup.toml");
    fs::write(
        &file,
        format!("{PORTFOLIO}\n[[projects]]\ntitle = \"Again\"\nid = \"piece1\"\n"),
    )
    .unwrap();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["validate", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate project id"));
}

#[test]
fn test_validate_missing_file_fails() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["validate", dir.path().join("nope.toml").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read portfolio"));
}
