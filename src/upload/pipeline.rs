use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use super::error::UploadError;
use super::request::UploadRequest;
use crate::object_store::RemoteStorage;
use crate::outcome::Outcome;
use crate::storage::models::UploadRecord;
use crate::storage::{InsertError, UploadRepository};

/// Content types accepted for upload. Matched exactly, case-sensitive.
pub const ALLOWED_CONTENT_TYPES: [&str; 4] =
    ["image/jpg", "image/jpeg", "image/png", "image/webp"];

pub fn is_allowed_content_type(content_type: &str) -> bool {
    ALLOWED_CONTENT_TYPES.contains(&content_type)
}

/// Acknowledgment for an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReceipt {
    pub upload_id: String,
}

/// Validates uploads and records the accepted ones.
///
/// Collaborators are injected at construction; the pipeline keeps no other
/// state, so concurrent calls are independent.
#[derive(Clone)]
pub struct UploadPipeline {
    repository: Arc<dyn UploadRepository>,
    storage: Arc<dyn RemoteStorage>,
}

impl UploadPipeline {
    pub fn new(repository: Arc<dyn UploadRepository>, storage: Arc<dyn RemoteStorage>) -> Self {
        Self {
            repository,
            storage,
        }
    }

    /// Run one upload through policy, size and persistence checks.
    ///
    /// Writes exactly one record on success and nothing on any failure.
    pub async fn upload_image(
        &self,
        request: UploadRequest<'_>,
    ) -> Outcome<UploadReceipt, UploadError> {
        let (file_name, content_type, content_stream) = request.into_parts();

        if !is_allowed_content_type(&content_type) {
            tracing::debug!(
                file_name = %file_name,
                content_type = %content_type,
                "Rejected upload: invalid file format"
            );
            return Outcome::failure(UploadError::InvalidFileFormat { content_type });
        }

        let limit = content_stream.limit();
        let content = match content_stream.read_to_end().await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(file_name = %file_name, error = %e, "Upload stream aborted");
                return Outcome::failure(UploadError::IncompleteStream(e));
            }
        };

        if content.truncated {
            tracing::debug!(file_name = %file_name, limit, "Rejected upload: file too large");
            return Outcome::failure(UploadError::FileTooLarge { limit });
        }

        // The key scheme is the file name until remote keys get their own layout.
        let remote_key = file_name.clone();
        let byte_size = content.bytes.len();

        let remote_url = match self.storage.upload_bytes(content.bytes, &remote_key).await {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(
                    remote_key = %remote_key,
                    error = %e,
                    "Remote storage upload failed"
                );
                return Outcome::failure(UploadError::StorageFailure(e));
            }
        };

        let record = UploadRecord {
            id: uuid::Uuid::new_v4().to_string(),
            name: file_name,
            remote_key,
            remote_url,
            created_at: Utc::now(),
        };

        match self.repository.insert(&record).await {
            Ok(()) => {
                tracing::info!(
                    upload_id = %record.id,
                    name = %record.name,
                    byte_size,
                    "Recorded upload"
                );
                Outcome::success(UploadReceipt {
                    upload_id: record.id,
                })
            }
            Err(InsertError::Conflict { remote_key }) => {
                tracing::debug!(remote_key = %remote_key, "Rejected upload: record conflict");
                Outcome::failure(UploadError::RecordConflict { remote_key })
            }
            Err(InsertError::Database(e)) => {
                tracing::error!(
                    upload_id = %record.id,
                    error = %e,
                    "Failed to persist upload record"
                );
                Outcome::failure(UploadError::PersistenceFailure(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use bytes::Bytes;

    use super::*;
    use crate::object_store::{PlaceholderStore, StorageError};
    use crate::upload::{ContentStream, UploadErrorKind};

    const LIMIT: u64 = 2 * 1024 * 1024;

    /// In-memory repository that enforces remote key uniqueness and counts calls.
    #[derive(Default)]
    struct MemoryRepository {
        records: Mutex<Vec<UploadRecord>>,
        calls: Mutex<usize>,
    }

    impl MemoryRepository {
        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }

        fn records(&self) -> Vec<UploadRecord> {
            self.records.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UploadRepository for MemoryRepository {
        async fn insert(&self, record: &UploadRecord) -> Result<(), InsertError> {
            *self.calls.lock().unwrap() += 1;
            let mut records = self.records.lock().unwrap();
            if records.iter().any(|r| r.remote_key == record.remote_key) {
                return Err(InsertError::Conflict {
                    remote_key: record.remote_key.clone(),
                });
            }
            records.push(record.clone());
            Ok(())
        }
    }

    struct FailingStorage;

    #[async_trait]
    impl RemoteStorage for FailingStorage {
        async fn upload_bytes(&self, _data: Bytes, _key: &str) -> Result<String, StorageError> {
            Err(StorageError::Backend("bucket unreachable".to_string()))
        }
    }

    fn pipeline(repository: &Arc<MemoryRepository>) -> UploadPipeline {
        UploadPipeline::new(repository.clone(), Arc::new(PlaceholderStore))
    }

    fn request(file_name: &str, content_type: &str, size: usize) -> UploadRequest<'static> {
        UploadRequest::new(
            file_name,
            content_type,
            ContentStream::from_bytes(vec![0u8; size], LIMIT),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_valid_upload_records_placeholder_mapping() {
        let repository = Arc::new(MemoryRepository::default());
        let outcome = pipeline(&repository)
            .upload_image(request("cat.png", "image/png", 500 * 1024))
            .await;

        assert!(outcome.is_success());
        assert_eq!(repository.calls(), 1);

        let records = repository.records();
        assert_eq!(records[0].name, "cat.png");
        assert_eq!(records[0].remote_key, "cat.png");
        assert_eq!(records[0].remote_url, "cat.png");
        assert_eq!(outcome.into_success().unwrap().upload_id, records[0].id);
    }

    #[tokio::test]
    async fn test_every_allowed_type_is_accepted() {
        let repository = Arc::new(MemoryRepository::default());
        let pipeline = pipeline(&repository);

        for (i, content_type) in ALLOWED_CONTENT_TYPES.iter().enumerate() {
            let outcome = pipeline
                .upload_image(request(&format!("img-{i}"), content_type, 16))
                .await;
            assert!(outcome.is_success(), "{content_type} should be accepted");
        }
        assert_eq!(repository.calls(), ALLOWED_CONTENT_TYPES.len());
    }

    #[tokio::test]
    async fn test_disallowed_types_are_rejected_without_insert() {
        let repository = Arc::new(MemoryRepository::default());
        let pipeline = pipeline(&repository);

        let rejected = [
            "application/pdf",
            "image/gif",
            "IMAGE/PNG",
            "image/png; charset=x",
            "text/plain",
        ];
        for content_type in rejected {
            let outcome = pipeline
                .upload_image(request("doc.pdf", content_type, 16))
                .await;
            let err = outcome.into_failure().expect("should fail");
            assert_eq!(err.kind(), UploadErrorKind::InvalidFileFormat);
        }
        assert_eq!(repository.calls(), 0);
    }

    #[tokio::test]
    async fn test_truncated_stream_is_rejected_without_insert() {
        let repository = Arc::new(MemoryRepository::default());
        let outcome = pipeline(&repository)
            .upload_image(request("big.png", "image/png", LIMIT as usize + 1))
            .await;

        let err = outcome.into_failure().expect("should fail");
        assert!(matches!(err, UploadError::FileTooLarge { limit } if limit == LIMIT));
        assert_eq!(repository.calls(), 0);
    }

    #[tokio::test]
    async fn test_exactly_at_limit_is_accepted() {
        let repository = Arc::new(MemoryRepository::default());
        let outcome = pipeline(&repository)
            .upload_image(request("edge.webp", "image/webp", LIMIT as usize))
            .await;

        assert!(outcome.is_success());
        assert_eq!(repository.calls(), 1);
    }

    #[tokio::test]
    async fn test_aborted_stream_is_rejected_without_insert() {
        use futures::stream;
        use tokio_util::io::StreamReader;

        let chunks: Vec<std::io::Result<Bytes>> = vec![
            Ok(Bytes::from_static(b"\x89PNG")),
            Err(std::io::Error::from(std::io::ErrorKind::ConnectionAborted)),
        ];
        let stream = ContentStream::new(StreamReader::new(stream::iter(chunks)), LIMIT);
        let request = UploadRequest::new("cut.png", "image/png", stream).unwrap();

        let repository = Arc::new(MemoryRepository::default());
        let outcome = pipeline(&repository).upload_image(request).await;

        assert_eq!(
            outcome.into_failure().map(|e| e.kind()),
            Some(UploadErrorKind::IncompleteStream)
        );
        assert_eq!(repository.calls(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_name_surfaces_conflict() {
        let repository = Arc::new(MemoryRepository::default());
        let pipeline = pipeline(&repository);

        let first = pipeline.upload_image(request("cat.png", "image/png", 16)).await;
        let second = pipeline.upload_image(request("cat.png", "image/png", 16)).await;

        assert!(first.is_success());
        assert_eq!(
            second.into_failure().map(|e| e.kind()),
            Some(UploadErrorKind::RecordConflict)
        );
        assert_eq!(repository.calls(), 2);
        assert_eq!(repository.records().len(), 1);
    }

    #[tokio::test]
    async fn test_storage_failure_skips_insert() {
        let repository = Arc::new(MemoryRepository::default());
        let pipeline = UploadPipeline::new(repository.clone(), Arc::new(FailingStorage));

        let outcome = pipeline.upload_image(request("cat.png", "image/png", 16)).await;

        assert_eq!(
            outcome.into_failure().map(|e| e.kind()),
            Some(UploadErrorKind::StorageFailure)
        );
        assert_eq!(repository.calls(), 0);
    }
}
