//! The submission workflow and read-side API client.
//!
//! `SolicitudesClient` owns the two-call submission protocol: create the
//! solicitud record, then attach its PDF. The two calls are strictly
//! sequential - the attachment references the server-assigned id returned
//! by the create step. There is no retry and no rollback: if the attach
//! step fails, the created solicitud stays on the server without its
//! document and the failure is surfaced to the caller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::documento::{AttachmentUpload, Documento};
use crate::domain::solicitud::{Estado, Solicitud, SolicitudCreate, SolicitudId, Usuario};
use crate::error::{Result, SubmissionError};
use crate::form::SubmissionForm;
use crate::http::{HttpClient, HttpResponse};

const SOLICITUDES_PATH: &str = "/api/solicitudes";
const AGREGAR_PDF_PATH: &str = "/api/agregarPDF";

/// Configuration for talking to the backend.
///
/// Host/port and timeout are deployment-time settings, not part of the
/// protocol contract.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend (e.g. <http://localhost:8000>)
    pub base_url: String,
    /// Timeout for each individual request in milliseconds. Expiry is
    /// surfaced as a network error.
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Identity context for the signed-in employee and the HR contact their
/// submissions are routed to.
///
/// Passed in explicitly rather than read from ambient state, so the same
/// client code serves the employee, supervisor, and HR screens.
#[derive(Debug, Clone)]
pub struct Session {
    pub empleado: Usuario,
    pub hr: Usuario,
}

/// Client for the solicitudes API.
///
/// Generic over the HTTP transport so the workflow can be driven against a
/// mock in tests. A single client serializes its own submissions with a
/// busy flag; invoking `submit` while another submission is in flight
/// fails fast with `SubmissionError::Busy`.
pub struct SolicitudesClient<H: HttpClient> {
    http: Arc<H>,
    config: ApiConfig,
    session: Session,
    in_flight: Arc<AtomicBool>,
}

impl<H: HttpClient> SolicitudesClient<H> {
    pub fn new(http: H, config: ApiConfig, session: Session) -> Self {
        Self {
            http: Arc::new(http),
            config,
            session,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Submit the form: create the solicitud, then attach its PDF.
    ///
    /// Steps, strictly sequential:
    /// 1. Validate the form. On missing fields, fail with `Validation`
    ///    before any network call.
    /// 2. POST the JSON payload to the create endpoint. Non-2xx fails with
    ///    `CreateRequest`; a 2xx body without an `id` fails with
    ///    `MalformedResponse`.
    /// 3. POST the multipart attachment referencing the returned id.
    ///    Non-2xx fails with `Upload`; the created solicitud is left on the
    ///    server without its document (no DELETE, no retry).
    /// 4. On success, clear the form and return the id.
    ///
    /// On every failure path the form is preserved so the user can
    /// resubmit; a resubmission after a partial failure creates a fresh
    /// solicitud and does not clean up the orphaned one.
    #[tracing::instrument(skip(self, form), fields(titulo = %form.titulo))]
    pub async fn submit(&self, form: &mut SubmissionForm) -> Result<SolicitudId> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!("Submission rejected, another one is in flight");
            return Err(SubmissionError::Busy);
        }
        // Release the flag on every exit path, including early returns.
        let in_flight = self.in_flight.clone();
        let _guard = scopeguard::guard((), move |_| {
            in_flight.store(false, Ordering::SeqCst);
        });

        let validated = form.validate()?;

        let payload = SolicitudCreate {
            titulo: validated.titulo,
            categoria: validated.categoria,
            descripcion: validated.descripcion,
            fecha: Utc::now(),
            empleado: self.session.empleado.clone(),
            supervisor: validated.supervisor,
            hr: self.session.hr.clone(),
            documento_id: String::new(),
        };
        let body = serde_json::to_string(&payload)?;

        let response = self
            .http
            .post_json(&self.config.base_url, SOLICITUDES_PATH, body, self.config.timeout_ms)
            .await?;
        if !response.is_success() {
            tracing::warn!(status = response.status, "Create solicitud rejected");
            return Err(SubmissionError::CreateRequest {
                status: response.status,
                body: response.body,
            });
        }

        let id = parse_created_id(&response)?;
        tracing::info!(solicitud_id = %id, "Solicitud created, uploading attachment");

        let upload = AttachmentUpload::new(id.clone(), validated.archivo);
        let response = self
            .http
            .post_multipart(
                &self.config.base_url,
                AGREGAR_PDF_PATH,
                upload.into_multipart(),
                self.config.timeout_ms,
            )
            .await?;
        if !response.is_success() {
            // The solicitud now exists server-side without its document.
            tracing::warn!(
                solicitud_id = %id,
                status = response.status,
                "Attachment upload rejected, solicitud left without document"
            );
            return Err(SubmissionError::Upload {
                status: response.status,
                body: response.body,
            });
        }

        form.clear();
        tracing::info!(solicitud_id = %id, "Submission complete");
        Ok(id)
    }

    /// Fetch all solicitudes, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_solicitudes(&self) -> Result<Vec<Solicitud>> {
        let response = self
            .http
            .get(&self.config.base_url, SOLICITUDES_PATH, self.config.timeout_ms)
            .await?;
        if !response.is_success() {
            return Err(SubmissionError::Api {
                status: response.status,
                body: response.body,
            });
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Fetch a single solicitud by id.
    #[tracing::instrument(skip(self), fields(solicitud_id = %id))]
    pub async fn fetch_solicitud(&self, id: &SolicitudId) -> Result<Solicitud> {
        let path = format!("{}/{}", SOLICITUDES_PATH, id.0);
        let response = self
            .http
            .get(&self.config.base_url, &path, self.config.timeout_ms)
            .await?;
        if !response.is_success() {
            return Err(SubmissionError::Api {
                status: response.status,
                body: response.body,
            });
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Fetch the attachment metadata for a solicitud.
    #[tracing::instrument(skip(self), fields(solicitud_id = %id))]
    pub async fn fetch_documentos(&self, id: &SolicitudId) -> Result<Vec<Documento>> {
        let path = format!("{}/{}/documentos", SOLICITUDES_PATH, id.0);
        let response = self
            .http
            .get(&self.config.base_url, &path, self.config.timeout_ms)
            .await?;
        if !response.is_success() {
            return Err(SubmissionError::Api {
                status: response.status,
                body: response.body,
            });
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Set the review state of a solicitud (approve/reject).
    #[tracing::instrument(skip(self), fields(solicitud_id = %id, estado = %estado))]
    pub async fn update_estado(&self, id: &SolicitudId, estado: Estado) -> Result<()> {
        let path = format!("{}/{}", SOLICITUDES_PATH, id.0);
        let body = serde_json::to_string(&serde_json::json!({ "estado": estado }))?;
        let response = self
            .http
            .put_json(&self.config.base_url, &path, body, self.config.timeout_ms)
            .await?;
        if !response.is_success() {
            return Err(SubmissionError::Api {
                status: response.status,
                body: response.body,
            });
        }
        Ok(())
    }
}

/// Read-side collaborator interface for the list/detail screens.
///
/// Screens depend on this instead of the concrete client, decoupling
/// presentation from the data source.
#[async_trait]
pub trait SolicitudesReader: Send + Sync {
    async fn fetch_solicitudes(&self) -> Result<Vec<Solicitud>>;
}

#[async_trait]
impl<H: HttpClient> SolicitudesReader for SolicitudesClient<H> {
    async fn fetch_solicitudes(&self) -> Result<Vec<Solicitud>> {
        SolicitudesClient::fetch_solicitudes(self).await
    }
}

/// Extract the server-assigned id from a successful create response.
fn parse_created_id(response: &HttpResponse) -> Result<SolicitudId> {
    let missing = || SubmissionError::MalformedResponse {
        field: "id",
        body: response.body.clone(),
    };
    let value: serde_json::Value = serde_json::from_str(&response.body).map_err(|_| missing())?;
    match value.get("id").and_then(|v| v.as_str()) {
        Some(id) if !id.is_empty() => Ok(SolicitudId(id.to_string())),
        _ => Err(missing()),
    }
}
