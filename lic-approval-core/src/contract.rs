//! # contract: renderer seam
//!
//! The generation pipeline only knows the [`Renderer`] trait. The real
//! implementation is [`crate::docx::DocxRenderer`]; tests use the generated
//! `MockRenderer` to observe what would be written without touching disk.
//!
//! Renderers own everything that is specific to the output container,
//! including registration of hyperlink relationships.

use std::path::{Path, PathBuf};

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use thiserror::Error;

use crate::model::DocumentModel;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to build document container: {0}")]
    Container(#[from] zip::result::ZipError),
}

/// Serializes a [`DocumentModel`] to `destination`.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait Renderer {
    /// Writes exactly one file at `destination`, replacing any existing file.
    fn render(&self, model: &DocumentModel, destination: &Path) -> Result<(), RenderError>;
}
