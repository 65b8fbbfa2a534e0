//! Error types for the submission workflow.

use thiserror::Error;

/// Result type alias using the tramite error type.
pub type Result<T> = std::result::Result<T, SubmissionError>;

/// Main error type for the submission workflow.
///
/// Every failure is surfaced synchronously to the caller; the workflow never
/// retries on its own. Except for the success path, the submission form is
/// left untouched so the user can correct and resubmit.
#[derive(Error, Debug)]
pub enum SubmissionError {
    /// Required form fields are missing. No network call was made.
    #[error("validation failed, missing fields: {}", missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    /// The create-solicitud call returned a non-2xx status.
    #[error("create solicitud failed with status {status}: {body}")]
    CreateRequest { status: u16, body: String },

    /// The create-solicitud call succeeded but the response body did not
    /// carry the required field. Server contract violation.
    #[error("create response missing '{field}': {body}")]
    MalformedResponse { field: &'static str, body: String },

    /// The attach-file call returned a non-2xx status. The solicitud created
    /// in the prior step persists server-side without its attachment.
    #[error("attachment upload failed with status {status}: {body}")]
    Upload { status: u16, body: String },

    /// Transport-level failure or timeout at either step.
    #[error("network error: {0}")]
    Network(String),

    /// A submission is already in flight on this client.
    #[error("a submission is already in flight")]
    Busy,

    /// A read-side call returned a non-2xx status.
    #[error("request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General error from anyhow
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<reqwest::Error> for SubmissionError {
    fn from(e: reqwest::Error) -> Self {
        SubmissionError::Network(e.to_string())
    }
}

impl SubmissionError {
    /// True if the user can fix this by editing the form (as opposed to a
    /// server or transport problem).
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, SubmissionError::Validation { .. })
    }
}
