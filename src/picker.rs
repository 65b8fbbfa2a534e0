//! File-picker collaborator.
//!
//! The submission screen asks a picker for a PDF before submitting. User
//! cancellation is a distinguishable outcome, not an error - the workflow
//! treats it as "no file chosen".

use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;

use crate::domain::documento::SelectedFile;
use crate::error::Result;

/// Outcome of asking the user to pick a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// The user chose a file.
    Selected(SelectedFile),
    /// The user dismissed the picker without choosing.
    Canceled,
}

/// Trait for obtaining the PDF to attach to a submission.
#[async_trait]
pub trait FilePicker: Send + Sync {
    /// Ask for a PDF.
    ///
    /// # Errors
    /// Returns an error only when the pick itself fails (e.g. the chosen
    /// file cannot be read). Cancellation is `Ok(PickOutcome::Canceled)`.
    async fn pick_pdf(&self) -> Result<PickOutcome>;
}

/// Picker that reads the document from a fixed filesystem path.
#[derive(Debug, Clone)]
pub struct PathFilePicker {
    path: PathBuf,
}

impl PathFilePicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FilePicker for PathFilePicker {
    async fn pick_pdf(&self) -> Result<PickOutcome> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "documento.pdf".to_string());

        tracing::debug!(filename = %name, size = bytes.len(), "Picked file from path");
        Ok(PickOutcome::Selected(SelectedFile::new(name, bytes)))
    }
}
