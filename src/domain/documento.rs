//! Document and attachment types.
//!
//! A document is attached to a solicitud as a second step, after the
//! solicitud record exists and the server has assigned it an id.

use serde::{Deserialize, Serialize};

use crate::domain::solicitud::SolicitudId;
use crate::http::MultipartBody;

/// Content type accepted by the attach endpoint.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A PDF chosen by the user, pending upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// An attachment upload bound to a created solicitud.
///
/// Can only be built from a `SolicitudId`, which in turn only comes out of a
/// successful create-solicitud response - the upload step is strictly ordered
/// after creation.
#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    pub solicitud_id: SolicitudId,
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl AttachmentUpload {
    pub fn new(solicitud_id: SolicitudId, file: SelectedFile) -> Self {
        Self {
            solicitud_id,
            filename: file.name,
            bytes: file.bytes,
        }
    }

    /// Build the multipart body the attach endpoint expects: the solicitud
    /// id, the filename, and the binary file part.
    pub fn into_multipart(self) -> MultipartBody {
        MultipartBody::new()
            .text("solicitud_id", self.solicitud_id.0)
            .text("filename", self.filename.clone())
            .file("file", self.filename, PDF_CONTENT_TYPE, self.bytes)
    }
}

/// Attachment metadata as returned by `GET /api/solicitudes/{id}/documentos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documento {
    pub id: String,
    pub solicitud_id: SolicitudId,
    pub filename: String,
    pub content_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_multipart_parts() {
        let upload = AttachmentUpload::new(
            SolicitudId("42".to_string()),
            SelectedFile::new("solicitud.pdf", vec![0x25, 0x50, 0x44, 0x46]),
        );

        let body = upload.into_multipart();
        assert_eq!(body.field("solicitud_id"), Some("42"));
        assert_eq!(body.field("filename"), Some("solicitud.pdf"));
        assert_eq!(body.files.len(), 1);
        assert_eq!(body.files[0].name, "file");
        assert_eq!(body.files[0].filename, "solicitud.pdf");
        assert_eq!(body.files[0].content_type, PDF_CONTENT_TYPE);
        assert_eq!(body.files[0].bytes, vec![0x25, 0x50, 0x44, 0x46]);
    }
}
