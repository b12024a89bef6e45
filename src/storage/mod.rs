pub mod db;
pub mod models;
mod tables;
mod uploads;

pub use db::{Database, DatabaseError};
pub use tables::*;

use async_trait::async_trait;
use thiserror::Error;

use models::UploadRecord;

#[derive(Debug, Error)]
pub enum InsertError {
    #[error("Upload with key '{remote_key}' already exists")]
    Conflict { remote_key: String },
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Persistence contract consumed by the upload pipeline.
#[async_trait]
pub trait UploadRepository: Send + Sync {
    /// Insert a new record. A record whose `remote_key` is already taken is
    /// rejected with [`InsertError::Conflict`] and nothing is written.
    async fn insert(&self, record: &UploadRecord) -> Result<(), InsertError>;
}
