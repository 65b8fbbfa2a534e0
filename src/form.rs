//! Submission form state and validation.

use crate::domain::documento::SelectedFile;
use crate::domain::solicitud::{Categoria, Usuario};
use crate::error::{Result, SubmissionError};

/// User-entered state of the submission screen.
///
/// The form is owned by the caller (the UI layer) and read once at
/// submission time. On any failure the fields are left untouched so the
/// user can correct and resubmit; they are cleared only after the full
/// workflow succeeds.
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    pub supervisor: Option<Usuario>,
    pub categoria: Option<Categoria>,
    pub titulo: String,
    pub descripcion: String,
    pub archivo: Option<SelectedFile>,
}

/// A form snapshot with all required fields present.
#[derive(Debug, Clone)]
pub struct ValidatedSubmission {
    pub supervisor: Usuario,
    pub categoria: Categoria,
    pub titulo: String,
    pub descripcion: String,
    pub archivo: SelectedFile,
}

impl SubmissionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that all five required fields are present and take an owned
    /// snapshot of them.
    ///
    /// # Errors
    /// Returns `SubmissionError::Validation` naming every missing field.
    /// The form itself is not modified.
    pub fn validate(&self) -> Result<ValidatedSubmission> {
        let mut missing = Vec::new();
        if self.supervisor.is_none() {
            missing.push("supervisor");
        }
        if self.categoria.is_none() {
            missing.push("categoria");
        }
        if self.titulo.is_empty() {
            missing.push("titulo");
        }
        if self.descripcion.is_empty() {
            missing.push("descripcion");
        }
        if self.archivo.is_none() {
            missing.push("archivo");
        }

        match (self.supervisor.clone(), self.categoria, self.archivo.clone()) {
            (Some(supervisor), Some(categoria), Some(archivo)) if missing.is_empty() => {
                Ok(ValidatedSubmission {
                    supervisor,
                    categoria,
                    titulo: self.titulo.clone(),
                    descripcion: self.descripcion.clone(),
                    archivo,
                })
            }
            _ => Err(SubmissionError::Validation { missing }),
        }
    }

    /// Reset every field, including the selected file.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when no field has been filled in yet.
    pub fn is_empty(&self) -> bool {
        self.supervisor.is_none()
            && self.categoria.is_none()
            && self.titulo.is_empty()
            && self.descripcion.is_empty()
            && self.archivo.is_none()
    }
}
