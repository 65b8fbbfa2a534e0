//! Client-side workflow for the document-approval system.
//!
//! This crate implements the two-step submission protocol used by the
//! "subir solicitud" screen: validate the form, POST the solicitud record as
//! JSON, then POST its PDF as a multipart attachment referencing the
//! server-assigned id. It also carries the read-side collaborator interface
//! the list/detail screens consume.

pub mod client;
pub mod domain;
pub mod error;
pub mod form;
pub mod http;
pub mod picker;

// Re-export commonly used types
pub use client::{ApiConfig, Session, SolicitudesClient, SolicitudesReader};
pub use domain::documento::{AttachmentUpload, Documento, SelectedFile, PDF_CONTENT_TYPE};
pub use domain::solicitud::{
    Categoria, Estado, Rol, Solicitud, SolicitudCreate, SolicitudId, Usuario,
};
pub use error::{Result, SubmissionError};
pub use form::{SubmissionForm, ValidatedSubmission};
pub use http::{HttpClient, HttpResponse, MockHttpClient, MultipartBody, ReqwestHttpClient};
pub use picker::{FilePicker, PathFilePicker, PickOutcome};
