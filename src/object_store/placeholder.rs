use async_trait::async_trait;
use bytes::Bytes;

use super::{RemoteStorage, StorageError};

/// Stand-in backend used until a real object store is wired up.
///
/// Nothing is transferred; the key doubles as the URL.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderStore;

#[async_trait]
impl RemoteStorage for PlaceholderStore {
    async fn upload_bytes(&self, data: Bytes, key: &str) -> Result<String, StorageError> {
        tracing::debug!(key, byte_size = data.len(), "Skipping remote upload (placeholder store)");
        Ok(key.to_string())
    }
}
