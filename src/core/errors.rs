use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize)]
pub enum UserHubError {
    /// Request used a verb the route does not serve
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// JSON or form body could not be decoded
    #[error("{0}")]
    MalformedInput(String),

    /// No user carries the given ID
    #[error("User not found")]
    UserNotFound(String),

    /// Multipart body had no usable "file" part
    #[error("{0}")]
    InvalidUpload(String),

    /// Uploaded bytes could not be written to disk
    #[error("Upload failed: {0}")]
    UploadFailure(String),

    #[error("Snapshot error: {0}")]
    SnapshotError(String),
}
