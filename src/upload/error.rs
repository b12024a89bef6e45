use thiserror::Error;

use crate::object_store::StorageError;
use crate::storage::DatabaseError;

/// Business-level reasons an upload is rejected.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Invalid file format: {content_type}")]
    InvalidFileFormat { content_type: String },
    #[error("File size limit reached ({limit} bytes)")]
    FileTooLarge { limit: u64 },
    #[error("File is required")]
    MissingFile,
    #[error("Upload '{remote_key}' already exists")]
    RecordConflict { remote_key: String },
    #[error("Remote storage failed: {0}")]
    StorageFailure(#[source] StorageError),
    #[error("Upload stream ended before completion: {0}")]
    IncompleteStream(#[source] std::io::Error),
    #[error("Failed to record upload: {0}")]
    PersistenceFailure(#[source] DatabaseError),
}

/// Discriminant of [`UploadError`], used by callers to branch on the kind of
/// rejection without inspecting payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadErrorKind {
    InvalidFileFormat,
    FileTooLarge,
    MissingFile,
    RecordConflict,
    StorageFailure,
    IncompleteStream,
    PersistenceFailure,
}

impl UploadError {
    pub fn kind(&self) -> UploadErrorKind {
        match self {
            UploadError::InvalidFileFormat { .. } => UploadErrorKind::InvalidFileFormat,
            UploadError::FileTooLarge { .. } => UploadErrorKind::FileTooLarge,
            UploadError::MissingFile => UploadErrorKind::MissingFile,
            UploadError::RecordConflict { .. } => UploadErrorKind::RecordConflict,
            UploadError::StorageFailure(_) => UploadErrorKind::StorageFailure,
            UploadError::IncompleteStream(_) => UploadErrorKind::IncompleteStream,
            UploadError::PersistenceFailure(_) => UploadErrorKind::PersistenceFailure,
        }
    }
}
