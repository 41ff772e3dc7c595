/// `load_config` module: loads the generator configuration from an optional
/// YAML file and applies environment overrides.
///
/// # Responsibilities
/// - Parse the user supplied YAML file into [`GeneratorConfig`]; keys that are
///   absent keep their defaults
/// - Apply `LIC_APPROVAL_*` environment variables on top of the file
/// - Fail with a clear message when the file cannot be read or parsed
///
/// # Errors
/// All errors use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::Result;
use lic_approval_core::config::GeneratorConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const ENV_OUTPUT_DIR: &str = "LIC_APPROVAL_OUTPUT_DIR";
pub const ENV_DESCRIPTOR: &str = "LIC_APPROVAL_DESCRIPTOR";
pub const ENV_TEMPLATES_DIR: &str = "LIC_APPROVAL_TEMPLATES_DIR";

/// Loads a YAML config file. Environment overrides are not applied here.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GeneratorConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    match serde_yaml::from_str::<GeneratorConfig>(&config_content) {
        Ok(config) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            Ok(config)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}

/// Overrides config paths with the `LIC_APPROVAL_*` variables that are set.
pub fn apply_env_overrides(mut config: GeneratorConfig) -> GeneratorConfig {
    if let Some(dir) = env_path(ENV_OUTPUT_DIR) {
        config.output_dir = dir;
    }
    if let Some(path) = env_path(ENV_DESCRIPTOR) {
        config.descriptor_path = path;
    }
    if let Some(dir) = env_path(ENV_TEMPLATES_DIR) {
        config.templates_dir = dir;
    }
    config
}

/// Effective configuration for a run: the file when given, else defaults,
/// then environment overrides.
pub fn resolve_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let config = match path {
        Some(path) => load_config(path)?,
        None => {
            info!("No config file given, using defaults");
            GeneratorConfig::default()
        }
    };
    Ok(apply_env_overrides(config))
}

fn env_path(var: &str) -> Option<PathBuf> {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => {
            info!(var, value = %value, "Config value overridden from env");
            Some(PathBuf::from(value))
        }
        _ => None,
    }
}
