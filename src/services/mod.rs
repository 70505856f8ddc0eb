//! Collaborators that cross a process or filesystem boundary.
//!
//! The app only sees the traits. Calls are blocking and run on a
//! [`JobRunner`] thread, so implementations must be `Send + Sync`.

mod export;
mod improve;
mod jobs;
mod persist;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::document::MarkdownDocument;

pub use export::HtmlRenderer;
pub use improve::{CommandImprover, UnconfiguredImprover};
pub use jobs::JobRunner;
pub use persist::FilePersistence;

/// Text-improvement call failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("no improvement command configured (use --improve-cmd)")]
    Unavailable,
    #[error("improvement command failed: {0}")]
    Failed(String),
    #[error("improvement command returned no text")]
    EmptyResponse,
    #[error("improvement did not finish: {0}")]
    Interrupted(String),
}

/// Save failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },
    #[error("save did not finish: {0}")]
    Interrupted(String),
}

/// Export failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("nothing to export")]
    EmptyDocument,
    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },
    #[error("export did not finish: {0}")]
    Interrupted(String),
}

/// Receipt for a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedRecord {
    pub path: PathBuf,
    pub bytes: usize,
    pub saved_at: DateTime<Local>,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageFormat {
    #[default]
    A4,
    Letter,
}

impl PageFormat {
    /// CSS `@page` size keyword.
    pub const fn css_size(self) -> &'static str {
        match self {
            Self::A4 => "A4",
            Self::Letter => "letter",
        }
    }
}

/// Page setup handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Vertical and horizontal margins in millimetres.
    pub margins: [f32; 2],
    pub page_format: PageFormat,
    /// Raster quality hint in `0.0..=1.0`.
    pub image_quality: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            margins: [15.0, 15.0],
            page_format: PageFormat::A4,
            image_quality: 0.98,
        }
    }
}

pub trait TextImprovementService: Send + Sync {
    /// Rewrite `text` for an entry of the given context type.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] if no improved text could be produced.
    fn improve(&self, text: &str, context_type: &str) -> Result<String, ServiceError>;
}

pub trait PersistenceService: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the document could not be stored.
    fn save(&self, document: &MarkdownDocument) -> Result<SavedRecord, PersistenceError>;
}

pub trait DocumentRenderer: Send + Sync {
    /// Render markdown to a file and return where it was written.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if nothing could be written.
    fn render_to_file(&self, markdown: &str, options: &RenderOptions)
    -> Result<PathBuf, RenderError>;
}

/// The collaborators a session talks to.
#[derive(Clone)]
pub struct Services {
    pub improver: Arc<dyn TextImprovementService>,
    pub persistence: Arc<dyn PersistenceService>,
    pub renderer: Arc<dyn DocumentRenderer>,
    pub render_options: RenderOptions,
}

impl Services {
    pub fn new(
        improver: Arc<dyn TextImprovementService>,
        persistence: Arc<dyn PersistenceService>,
        renderer: Arc<dyn DocumentRenderer>,
    ) -> Self {
        Self {
            improver,
            persistence,
            renderer,
            render_options: RenderOptions::default(),
        }
    }

    #[must_use]
    pub const fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("render_options", &self.render_options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_render_options_match_print_layout() {
        let options = RenderOptions::default();
        assert_eq!(options.margins, [15.0, 15.0]);
        assert_eq!(options.page_format, PageFormat::A4);
        assert!((options.image_quality - 0.98).abs() < f32::EPSILON);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ServiceError::Failed("exit status 1".to_string()).to_string(),
            "improvement command failed: exit status 1"
        );
        let err = PersistenceError::Write {
            path: PathBuf::from("resume.md"),
            message: "denied".to_string(),
        };
        assert_eq!(err.to_string(), "failed to write resume.md: denied");
    }
}
