//! Hyperlink runs.
//!
//! A hyperlink is composed as an ordinary [`RenderableRun`] carrying its target.
//! Registering the external relationship for the target is the renderer's job
//! (see [`crate::docx`]); URLs are passed through opaque and never validated.

use crate::model::{RenderableRun, RunColor, ThemeColor};

/// Target URL and display label of a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperlink {
    pub url: String,
    pub label: String,
}

impl Hyperlink {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
        }
    }

    /// Link whose label is the URL itself.
    pub fn bare(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            label: url.clone(),
            url,
        }
    }

    pub fn to_run(&self) -> RenderableRun {
        compose_hyperlink(&self.label, &self.url)
    }
}

/// Builds an underlined, hyperlink-coloured run pointing at `url`.
pub fn compose_hyperlink(label: &str, url: &str) -> RenderableRun {
    RenderableRun {
        text: label.to_string(),
        underline: true,
        color: Some(RunColor::Theme(ThemeColor::Hyperlink)),
        hyperlink_target: Some(url.to_string()),
        ..RenderableRun::default()
    }
}

/// Applies hyperlink styling to an already formatted run, keeping its size
/// and emphasis.
pub fn link_run(run: RenderableRun, url: &str) -> RenderableRun {
    RenderableRun {
        underline: true,
        color: Some(RunColor::Theme(ThemeColor::Hyperlink)),
        hyperlink_target: Some(url.to_string()),
        ..run
    }
}
