use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for an accepted upload, stored in redb.
///
/// Records are written once and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: String,
    pub name: String,
    /// Storage-addressing key. Unique across records.
    pub remote_key: String,
    /// Location reported by the remote storage backend.
    pub remote_url: String,
    pub created_at: DateTime<Utc>,
}
