//! End-to-end tests for the pypack binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn pypack() -> Command {
    Command::cargo_bin("pypack").expect("binary built")
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, content).expect("write file");
}

/// The working copy is a timestamped sibling of the project.
fn find_working_copy(parent: &Path, name: &str) -> Option<PathBuf> {
    let prefix = format!("{}_pypack_", name);
    fs::read_dir(parent)
        .expect("read parent dir")
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .find(|p| {
            p.is_dir()
                && p.file_name()
                    .map(|n| n.to_string_lossy().starts_with(&prefix))
                    .unwrap_or(false)
        })
}

#[test]
fn test_full_run_clones_cleans_and_zips() {
    let dir = TempDir::new().expect("temp dir");
    let project = dir.path().join("proj");
    write(&project, "main.py", "import requests\n");
    write(&project, "debug.log", "noise\n");
    write(&project, "__pycache__/main.cpython-311.pyc", "bytecode");

    pypack()
        .arg(&project)
        .args(["--full", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All done!"));

    let copy = find_working_copy(dir.path(), "proj").expect("working copy created");
    assert!(copy.join("main.py").exists());
    assert!(!copy.join("debug.log").exists(), "junk file cleaned in copy");
    assert!(!copy.join("__pycache__").exists());

    let zip_path = copy.with_extension("zip");
    assert!(zip_path.exists(), "zip created next to working copy");

    // Original untouched, junk and all
    assert!(project.join("debug.log").exists());
    assert!(project.join("__pycache__").exists());
}

#[test]
fn test_requirements_seeded_from_imports() {
    let dir = TempDir::new().expect("temp dir");
    let project = dir.path().join("proj");
    write(
        &project,
        "main.py",
        "import os\nimport requests\nfrom flask import Flask\nfrom . import helpers\n",
    );

    pypack()
        .arg(&project)
        .args(["--req", "--readme", "--yes"])
        .assert()
        .success();

    let copy = find_working_copy(dir.path(), "proj").expect("working copy created");
    let requirements = fs::read_to_string(copy.join("requirements.txt")).expect("manifest written");
    assert_eq!(requirements, "flask\nrequests\n");
    assert!(copy.join("README.md").exists());

    // Generated files belong to the copy, not the original
    assert!(!project.join("requirements.txt").exists());
}

#[test]
fn test_existing_requirements_left_alone() {
    let dir = TempDir::new().expect("temp dir");
    let project = dir.path().join("proj");
    write(&project, "main.py", "import requests\n");
    write(&project, "requirements.txt", "pinned==1.0\n");
    write(&project, "README.md", "# custom\n");

    pypack()
        .arg(&project)
        .args(["--req", "--readme", "--yes"])
        .assert()
        .success();

    let copy = find_working_copy(dir.path(), "proj").expect("working copy created");
    assert_eq!(
        fs::read_to_string(copy.join("requirements.txt")).unwrap(),
        "pinned==1.0\n"
    );
    assert_eq!(fs::read_to_string(copy.join("README.md")).unwrap(), "# custom\n");
}

#[test]
fn test_archive_contains_project_files() {
    let dir = TempDir::new().expect("temp dir");
    let project = dir.path().join("proj");
    write(&project, "main.py", "print('hi')\n");
    write(&project, "pkg/util.py", "x = 1\n");

    pypack()
        .arg(&project)
        .args(["--full", "--yes"])
        .assert()
        .success();

    let copy = find_working_copy(dir.path(), "proj").expect("working copy created");
    let copy_name = copy.file_name().unwrap().to_string_lossy().into_owned();

    let file = fs::File::open(copy.with_extension("zip")).expect("open zip");
    let archive = zip::ZipArchive::new(file).expect("read zip");
    let names: Vec<&str> = archive.file_names().collect();
    assert!(names.contains(&format!("{}/main.py", copy_name).as_str()));
    assert!(names.contains(&format!("{}/pkg/util.py", copy_name).as_str()));
}

#[test]
fn test_dry_run_reports_without_touching_anything() {
    let dir = TempDir::new().expect("temp dir");
    let project = dir.path().join("proj");
    write(&project, "main.py", "x = 1\n");
    write(&project, "__pycache__/main.cpython-311.pyc", "bytecode");

    pypack()
        .arg(&project)
        .args(["--dry-run", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would remove"));

    assert!(project.join("__pycache__").exists(), "nothing deleted");
    assert!(
        find_working_copy(dir.path(), "proj").is_none(),
        "no working copy in dry-run"
    );
}

#[test]
fn test_json_report() {
    let dir = TempDir::new().expect("temp dir");
    let project = dir.path().join("proj");
    write(&project, "main.py", "x = 1\n");
    write(&project, "stale.pyc", "bytecode");

    let output = pypack()
        .arg(&project)
        .args(["--full", "--yes", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON report");
    assert!(report["working_copy"].is_string());
    assert_eq!(report["clean"]["removed"].as_array().unwrap().len(), 1);
    assert!(report["archive"]["files"].as_u64().unwrap() >= 1);
}

#[test]
fn test_missing_path_fails() {
    let dir = TempDir::new().expect("temp dir");
    pypack()
        .arg(dir.path().join("nope"))
        .arg("--yes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn test_yes_requires_a_path_argument() {
    pypack()
        .arg("--yes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("project path is required"));
}
