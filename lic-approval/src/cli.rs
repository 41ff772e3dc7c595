///
/// CLI glue for lic-approval: argument parsing, configuration, and reporting
/// the outcome of one generation run.
///
/// All form content and rendering lives in [`lic_approval_core`]; this module
/// only turns command line input into a [`GenerationRequest`] and prints the
/// result.
///
/// ## How To Use
/// - Command line: `lic-approval --family bdp --version "2.10.1 5.0.0"`
/// - Programmatic/integration use: call [`run`] with a constructed [`Cli`].
use crate::load_config::resolve_config;
use anyhow::Result;
use chrono::Local;
use clap::Parser;
use lic_approval_core::docx::DocxRenderer;
use lic_approval_core::generate::{generate, GenerationRequest};
use lic_approval_core::rules::FamilyKey;
use std::path::PathBuf;

/// Generate the third party software license approval form for a taxonomy.
#[derive(Parser, Debug)]
#[clap(
    name = "lic-approval",
    about = "Generate the third party software license approval form for a taxonomy family"
)]
pub struct Cli {
    /// The taxonomy's family name, e.g. eba, bbk, us-gaap
    #[clap(long)]
    pub family: Option<String>,

    /// The taxonomy's version; bdp takes two versions separated by a space
    #[clap(long)]
    pub version: String,

    /// Path to the YAML config file
    #[clap(long)]
    pub config: Option<PathBuf>,
}

/// Extracted CLI logic entrypoint for integration tests and main()
pub fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    let family = match FamilyKey::new(cli.family.as_deref().unwrap_or_default()) {
        Ok(family) => family,
        Err(e) => {
            tracing::error!(error = %e, "No taxonomy family given");
            eprintln!("ERROR: Taxonomy family not found! Pass it with --family <name>.");
            return Err(e.into());
        }
    };

    let config = resolve_config(cli.config.as_deref())?;
    config.trace_loaded();

    let request = GenerationRequest {
        family,
        version: cli.version,
        date: Local::now().date_naive(),
    };
    tracing::info!(family = %request.family, version = %request.version, "Starting generation");

    let report = match generate(&request, &config, &DocxRenderer::new()) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "Generation failed");
            eprintln!("ERROR: {e}");
            return Err(e.into());
        }
    };

    if !report.known_family {
        println!(
            "Note: '{}' is not a known taxonomy family, default content was used.",
            report.family
        );
    }
    for placeholder in &report.placeholders {
        println!(
            "Check row '{}': placeholder left ({:?}).",
            placeholder.label.replace('\n', " ").trim(),
            placeholder.reason
        );
    }
    println!("Document successfully generated!");
    println!(
        "Your generated file: {} can be found at '{}'",
        report.file_name,
        config.output_dir.display()
    );
    tracing::info!(output = ?report.output_path, "exit");
    Ok(())
}
