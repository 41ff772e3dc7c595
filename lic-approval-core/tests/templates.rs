use std::fs::{create_dir_all, write};

use lic_approval_core::rules::FamilyKey;
use lic_approval_core::templates::{discover_template, load_template, TemplateError};
use tempfile::tempdir;

fn family(key: &str) -> FamilyKey {
    FamilyKey::new(key).unwrap()
}

#[test]
fn discovery_matches_case_insensitively_and_takes_the_first_match() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    create_dir_all(root.join("BOE-Banking")).unwrap();
    write(root.join("BOE-Banking/a.json"), "{}").unwrap();
    write(root.join("BOE-Banking/b.json"), "{}").unwrap();
    write(root.join("eba.json"), "{}").unwrap();

    let found = discover_template(root, &family("boe-banking")).expect("template found");

    assert_eq!(found, root.join("BOE-Banking/a.json"));
}

#[test]
fn discovery_without_match_is_none() {
    let dir = tempdir().unwrap();
    write(dir.path().join("eba.json"), "{}").unwrap();

    assert_eq!(discover_template(dir.path(), &family("cipc")), None);
}

#[test]
fn discovery_in_missing_directory_is_none() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("templates");

    assert_eq!(discover_template(&missing, &family("eba")), None);
}

#[test]
fn load_reads_license_section() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("boe-statistics.json");
    write(
        &path,
        r#"{
  "name": "boe-statistics",
  "license": {
    "swname": "BoE Statistics",
    "swdescription": "Statistical returns",
    "licweb1": "https://www.example.website.com/licence"
  }
}"#,
    )
    .unwrap();

    let data = load_template(&path).expect("template loads");

    assert_eq!(data.software_name(), Some("BoE Statistics"));
    assert_eq!(data.software_description(), Some("Statistical returns"));
    assert_eq!(
        data.license_web_link(),
        Some("https://www.example.website.com/licence")
    );
}

#[test]
fn load_without_license_section_is_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("eba.json");
    write(&path, r#"{"name": "eba"}"#).unwrap();

    let data = load_template(&path).unwrap();

    assert_eq!(data.software_name(), None);
    assert_eq!(data.license_web_link(), None);
}

#[test]
fn non_json_template_carries_no_data() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("eba.txt");
    write(&path, "not json").unwrap();

    assert_eq!(load_template(&path).unwrap().license, None);
}

#[test]
fn invalid_json_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("eba.json");
    write(&path, "{ not json").unwrap();

    let err = load_template(&path).unwrap_err();

    assert!(matches!(err, TemplateError::Parse { .. }));
    assert!(err.to_string().contains("parse"));
}
