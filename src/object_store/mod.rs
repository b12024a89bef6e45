mod placeholder;

pub use placeholder::PlaceholderStore;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Remote object storage that uploaded bytes are handed to before their
/// metadata is recorded.
#[async_trait]
pub trait RemoteStorage: Send + Sync {
    /// Store `data` under `key` and return the URL it can be resolved at.
    async fn upload_bytes(&self, data: Bytes, key: &str) -> Result<String, StorageError>;
}
