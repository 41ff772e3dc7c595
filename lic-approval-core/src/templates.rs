//! Template discovery and loading.
//!
//! Templates are JSON files somewhere below the templates directory whose path
//! mentions the family. Only the `license` object is read.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::rules::FamilyKey;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse template {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TemplateData {
    #[serde(default)]
    pub license: Option<LicenseSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LicenseSection {
    #[serde(default)]
    pub swname: Option<String>,
    #[serde(default)]
    pub swdescription: Option<String>,
    #[serde(default)]
    pub licweb1: Option<String>,
}

impl TemplateData {
    pub fn software_name(&self) -> Option<&str> {
        self.license.as_ref()?.swname.as_deref()
    }

    pub fn software_description(&self) -> Option<&str> {
        self.license.as_ref()?.swdescription.as_deref()
    }

    pub fn license_web_link(&self) -> Option<&str> {
        self.license.as_ref()?.licweb1.as_deref()
    }
}

/// First file below `templates_dir` (walked in file name order) whose path
/// relative to `templates_dir` contains the family, compared case-insensitively.
pub fn discover_template(templates_dir: &Path, family: &FamilyKey) -> Option<PathBuf> {
    if !templates_dir.is_dir() {
        warn!(templates_dir = %templates_dir.display(), "Templates directory not found");
        return None;
    }
    let needle = family.as_str().to_lowercase();

    let found = WalkDir::new(templates_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(error = %e, "Skipping unreadable template entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .find(|path| {
            let relative = path.strip_prefix(templates_dir).unwrap_or(path);
            relative.to_string_lossy().to_lowercase().contains(&needle)
        });

    match &found {
        Some(path) => info!(family = %family, template = %path.display(), "Template discovered"),
        None => info!(family = %family, "No template matches family"),
    }
    found
}

/// Loads the template at `path`. Files other than `.json` carry no data.
pub fn load_template(path: &Path) -> Result<TemplateData, TemplateError> {
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if !is_json {
        warn!(template = %path.display(), "Template is not JSON, ignoring its content");
        return Ok(TemplateData::default());
    }

    let content = fs::read_to_string(path).map_err(|source| TemplateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data: TemplateData =
        serde_json::from_str(&content).map_err(|source| TemplateError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(template = %path.display(), ?data, "Template loaded");
    Ok(data)
}
