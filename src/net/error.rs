//! Errors surfaced by the API access layer.

/// Errors produced by [`crate::net::api::ApiClient`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (connect, timeout, TLS, ...).
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered 401. Persisted session state has already been
    /// cleared and a session-expired event emitted.
    #[error("unauthorized: session cleared, sign in again")]
    Unauthorized,

    /// The server answered with any other non-success status.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The upload file extension is not one the server accepts.
    #[error("file type {extension:?} not allowed; allowed: .pdf, .xml, .png, .jpg, .jpeg")]
    UnsupportedFileType { extension: String },

    /// The upload file could not be read from disk.
    #[error("cannot read upload {path}: {message}")]
    UploadRead { path: String, message: String },
}

impl ApiError {
    /// HTTP status carried by the error, if the server responded.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
