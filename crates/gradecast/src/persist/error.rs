use thiserror::Error;

use super::schema::ArtifactKind;

/// Errors while reading an artifact.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid artifact JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported format version {found} (this build reads version {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("expected a {expected} artifact, found a {found} artifact")]
    KindMismatch {
        expected: ArtifactKind,
        found: ArtifactKind,
    },

    /// The document parsed but describes an invalid object.
    #[error("validation failed: {0}")]
    Validation(String),
}

/// Errors while writing an artifact.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
