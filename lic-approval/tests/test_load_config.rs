use lic_approval::load_config::{
    apply_env_overrides, load_config, resolve_config, ENV_DESCRIPTOR, ENV_OUTPUT_DIR,
    ENV_TEMPLATES_DIR,
};
use lic_approval_core::config::{GeneratorConfig, DEFAULT_OUTPUT_DIR};
use serial_test::serial;
use std::env;
use std::fs::write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn clear_env() {
    for var in [ENV_OUTPUT_DIR, ENV_DESCRIPTOR, ENV_TEMPLATES_DIR] {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_load_config_success() {
    let config_yaml = r#"
output_dir: ./tmp/lics
descriptor_path: /opt/installer/ArtifactDatabase.xml
templates_dir: ./templates
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    let config = load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.output_dir, PathBuf::from("./tmp/lics"));
    assert_eq!(
        config.descriptor_path,
        PathBuf::from("/opt/installer/ArtifactDatabase.xml")
    );
    assert_eq!(config.templates_dir, PathBuf::from("./templates"));
}

/// Keys left out of the file keep their defaults.
#[test]
#[serial]
fn test_load_config_partial_file_keeps_defaults() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "output_dir: out\n").unwrap();

    let config = load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.output_dir, PathBuf::from("out"));
    assert_eq!(
        config.descriptor_path,
        GeneratorConfig::default().descriptor_path
    );
}

#[test]
#[serial]
fn test_load_config_invalid_yaml() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "output_dir: [unclosed\n").unwrap();

    let err = load_config(config_file.path()).unwrap_err();

    assert!(err.to_string().contains("parse"), "got: {err}");
}

#[test]
#[serial]
fn test_load_config_missing_file() {
    let err = load_config("/definitely/not/here/config.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
#[serial]
fn test_env_overrides_replace_paths() {
    clear_env();
    env::set_var(ENV_OUTPUT_DIR, "/srv/lics");
    env::set_var(ENV_TEMPLATES_DIR, "/srv/templates");

    let config = apply_env_overrides(GeneratorConfig::default());
    clear_env();

    assert_eq!(config.output_dir, PathBuf::from("/srv/lics"));
    assert_eq!(config.templates_dir, PathBuf::from("/srv/templates"));
    assert_eq!(
        config.descriptor_path,
        GeneratorConfig::default().descriptor_path
    );
}

#[test]
#[serial]
fn test_empty_env_value_is_ignored() {
    clear_env();
    env::set_var(ENV_DESCRIPTOR, "");

    let config = apply_env_overrides(GeneratorConfig::default());
    clear_env();

    assert_eq!(config, GeneratorConfig::default());
}

#[test]
#[serial]
fn test_resolve_config_without_file_uses_defaults() {
    clear_env();

    let config = resolve_config(None).expect("defaults resolve");

    assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
}
