use assert_cmd::Command;
use chrono::Local;
use predicates::prelude::*;
use std::fs::{read_dir, write, File};
use std::io::Read;
use std::path::Path;
use tempfile::{tempdir, TempDir};

/// Writes a config pointing every path into a fresh temp dir.
fn workspace() -> (TempDir, std::path::PathBuf) {
    let dir = tempdir().expect("temp dir");
    std::fs::create_dir_all(dir.path().join("templates")).expect("templates dir");
    write(
        dir.path().join("ArtifactDatabase.xml"),
        r#"<Artifacts><ProductVersion MajorVersionYear="2025"/></Artifacts>"#,
    )
    .expect("write descriptor");
    let config = dir.path().join("config.yaml");
    write(
        &config,
        format!(
            "output_dir: {out}\ndescriptor_path: {desc}\ntemplates_dir: {tpl}\n",
            out = dir.path().join("lics").display(),
            desc = dir.path().join("ArtifactDatabase.xml").display(),
            tpl = dir.path().join("templates").display(),
        ),
    )
    .expect("write config");
    (dir, config)
}

fn today() -> String {
    Local::now().date_naive().format("%Y%m%d").to_string()
}

fn written_files(dir: &Path) -> Vec<String> {
    read_dir(dir)
        .expect("output dir exists")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn generate_cli_writes_one_form() {
    let (dir, config) = workspace();

    let mut cmd = Command::cargo_bin("lic-approval").expect("Binary exists");
    cmd.arg("--family")
        .arg("eba")
        .arg("--version")
        .arg("3.2")
        .arg("--config")
        .arg(&config)
        .current_dir(dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Document successfully generated!"));

    let expected = format!(
        "eba 3.2 XBRL Taxonomy - Third Party Software License Approval Form {}.docx",
        today()
    );
    assert_eq!(written_files(&dir.path().join("lics")), vec![expected]);
}

#[test]
fn generated_bdp_form_is_a_readable_docx() {
    let (dir, config) = workspace();

    Command::cargo_bin("lic-approval")
        .expect("Binary exists")
        .args(["--family", "bdp", "--version", "2.10.1 5.0.0", "--config"])
        .arg(&config)
        .assert()
        .success();

    let name = format!(
        "bdp 2.10.1 5.0.0 XBRL Taxonomy - Third Party Software License Approval Form {}.docx",
        today()
    );
    let file = File::open(dir.path().join("lics").join(name)).expect("form written");
    let mut archive = zip::ZipArchive::new(file).expect("valid zip container");
    let mut document = String::new();
    archive
        .by_name("word/document.xml")
        .expect("document part")
        .read_to_string(&mut document)
        .expect("utf-8 document");
    assert!(document.contains("2.10.1 bdp v5.0.0"));
    assert!(document.contains("2025"));
}

#[test]
fn missing_family_fails_without_writing() {
    let (dir, config) = workspace();

    Command::cargo_bin("lic-approval")
        .expect("Binary exists")
        .args(["--version", "3.2", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Taxonomy family not found"));

    assert!(!dir.path().join("lics").exists());
}

#[test]
fn empty_family_fails() {
    let (_dir, config) = workspace();

    Command::cargo_bin("lic-approval")
        .expect("Binary exists")
        .args(["--family", "", "--version", "3.2", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Taxonomy family not found"));
}

#[test]
fn unknown_family_and_missing_descriptor_are_reported() {
    let (dir, config) = workspace();
    std::fs::remove_file(dir.path().join("ArtifactDatabase.xml")).expect("remove descriptor");

    Command::cargo_bin("lic-approval")
        .expect("Binary exists")
        .args(["--family", "not-a-family", "--version", "1", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("not a known taxonomy family")
                .and(predicate::str::contains("DescriptorUnavailable")),
        );
}

#[test]
fn output_dir_env_override_wins_over_config() {
    let (dir, config) = workspace();
    let override_dir = dir.path().join("elsewhere");

    Command::cargo_bin("lic-approval")
        .expect("Binary exists")
        .args(["--family", "lei", "--version", "1", "--config"])
        .arg(&config)
        .env("LIC_APPROVAL_OUTPUT_DIR", &override_dir)
        .assert()
        .success();

    assert_eq!(written_files(&override_dir).len(), 1);
    assert!(!dir.path().join("lics").exists());
}

#[test]
fn unreadable_config_fails() {
    let dir = tempdir().expect("temp dir");

    Command::cargo_bin("lic-approval")
        .expect("Binary exists")
        .args(["--family", "eba", "--version", "1", "--config"])
        .arg(dir.path().join("missing.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}
