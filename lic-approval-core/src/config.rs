use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEFAULT_OUTPUT_DIR: &str = "lics";
pub const DEFAULT_DESCRIPTOR_PATH: &str = "C:/Projects/installer/ArtifactDatabase.xml";
pub const DEFAULT_TEMPLATES_DIR: &str = "../../templates";

/// Where the generator reads its inputs and writes the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub output_dir: PathBuf,
    /// Artifact database XML holding the major version year.
    pub descriptor_path: PathBuf,
    pub templates_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            descriptor_path: PathBuf::from(DEFAULT_DESCRIPTOR_PATH),
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
        }
    }
}

impl GeneratorConfig {
    pub fn trace_loaded(&self) {
        info!(
            output_dir = %self.output_dir.display(),
            descriptor_path = %self.descriptor_path.display(),
            templates_dir = %self.templates_dir.display(),
            "Loaded GeneratorConfig"
        );
        debug!(?self, "GeneratorConfig loaded (full debug)");
    }
}
