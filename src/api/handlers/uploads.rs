use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use futures::TryStreamExt;
use std::sync::Arc;
use tokio_util::io::StreamReader;

use super::upload_error;
use crate::api::response::{ApiError, JSend};
use crate::upload::{ContentStream, UploadError, UploadReceipt, UploadRequest};
use crate::AppState;

/// Accept a multipart upload. The first part carrying a filename is the file;
/// other parts are ignored.
pub async fn create_upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<JSend<UploadReceipt>>), ApiError> {
    let limit = state.config.max_upload_size;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart data: {e}")))?
    {
        let Some(file_name) = field.file_name().map(|s| s.to_string()) else {
            continue;
        };
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let reader = StreamReader::new(field.map_err(std::io::Error::other));
        let request = UploadRequest::new(file_name, content_type, ContentStream::new(reader, limit))
            .map_err(|e| ApiError::bad_request(e.to_string()))?;

        return match state.pipeline.upload_image(request).await.into_result() {
            Ok(receipt) => {
                tracing::debug!(upload_id = %receipt.upload_id, "Created upload");
                Ok(JSend::created(receipt))
            }
            Err(e) => Err(upload_error(e)),
        };
    }

    Err(upload_error(UploadError::MissingFile))
}
