mod health;
mod uploads;

use crate::api::response::ApiError;
use crate::upload::{UploadError, UploadErrorKind};

pub use health::health;
pub use uploads::create_upload;

/// Map a pipeline rejection to an ApiError
fn upload_error(e: UploadError) -> ApiError {
    match e.kind() {
        UploadErrorKind::InvalidFileFormat
        | UploadErrorKind::FileTooLarge
        | UploadErrorKind::MissingFile
        | UploadErrorKind::IncompleteStream => ApiError::bad_request(e.to_string()),
        UploadErrorKind::RecordConflict => ApiError::conflict(e.to_string()),
        UploadErrorKind::StorageFailure => ApiError::bad_gateway(e.to_string()),
        UploadErrorKind::PersistenceFailure => ApiError::internal(e.to_string()),
    }
}
