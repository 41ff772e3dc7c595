//! High-level pipeline: resolve → look up → build → name → render.
//!
//! This module runs one generation of a license approval form:
//!   - Finds and loads the family's template, if any ([`crate::templates`])
//!   - Resolves the family's [`ContentVariant`] from the rule table
//!   - Reads the approximate version from the artifact database
//!   - Assembles the [`crate::model::DocumentModel`]
//!   - Composes the output file name and hands model and destination to a [`Renderer`]
//!
//! # Major Types
//! - [`GenerationRequest`]: family, raw version and the run date
//! - [`GenerationReport`]: what was written and which fields were left as placeholders
//!
//! # Error Handling
//! Only two conditions are recovered locally: an unknown family (default
//! variant) and an unreadable artifact database (placeholder value). Every
//! other failure ends the run with a [`GenerateError`] and nothing is written.
//!
//! The run is synchronous and writes exactly one file on success.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::builder::{build_document, BuildInputs};
use crate::config::GeneratorConfig;
use crate::contract::{RenderError, Renderer};
use crate::filename::FileNameParts;
use crate::model::Placeholder;
use crate::rules::{ContentVariant, FamilyKey};
use crate::templates::{discover_template, load_template, TemplateError};
use crate::version_lookup::{lookup_approximate_version, ApproximateVersion, VersionLookupError};

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub family: FamilyKey,
    /// Version exactly as given on the command line.
    pub version: String,
    pub date: NaiveDate,
}

#[derive(Debug)]
pub struct GenerationReport {
    pub family: FamilyKey,
    pub known_family: bool,
    pub file_name: String,
    pub output_path: PathBuf,
    pub template: Option<PathBuf>,
    pub approximate_version: ApproximateVersion,
    pub placeholders: Vec<Placeholder>,
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    VersionLookup(#[from] VersionLookupError),
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
}

pub fn generate<R>(
    request: &GenerationRequest,
    config: &GeneratorConfig,
    renderer: &R,
) -> Result<GenerationReport, GenerateError>
where
    R: Renderer + ?Sized,
{
    let family = &request.family;
    info!(
        family = %family,
        version = %request.version,
        "[GENERATE] Starting license approval generation"
    );

    let template_path = discover_template(&config.templates_dir, family);
    let template = match &template_path {
        Some(path) => Some(load_template(path).map_err(|e| {
            error!(error = %e, "[GENERATE][ERROR] Template could not be loaded");
            e
        })?),
        None => None,
    };

    let known_family = family.is_known();
    if !known_family {
        warn!(family = %family, "[GENERATE] Family has no dedicated rules, using defaults");
    }
    let variant = ContentVariant::resolve(family, &request.version);

    let approximate_version = lookup_approximate_version(&config.descriptor_path)?;
    if !approximate_version.is_available() {
        warn!(
            descriptor = %config.descriptor_path.display(),
            "[GENERATE] Approximate version unavailable"
        );
    }

    let model = build_document(&BuildInputs {
        variant: &variant,
        approximate_version: &approximate_version,
        template: template.as_ref(),
        submission_date: request.date,
    });

    let file_name =
        FileNameParts::for_run(family.as_str(), &request.version, request.date).compose();
    fs::create_dir_all(&config.output_dir).map_err(|source| GenerateError::OutputDir {
        path: config.output_dir.clone(),
        source,
    })?;
    let output_path = config.output_dir.join(&file_name);

    if let Err(e) = renderer.render(&model, &output_path) {
        error!(error = %e, path = %output_path.display(), "[GENERATE][ERROR] Rendering failed");
        return Err(e.into());
    }
    info!(path = %output_path.display(), "[GENERATE] License approval written");

    Ok(GenerationReport {
        family: family.clone(),
        known_family,
        file_name,
        output_path,
        template: template_path,
        approximate_version,
        placeholders: model.placeholders,
    })
}
