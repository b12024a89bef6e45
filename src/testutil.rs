//! Shared test helpers for handler tests.

use std::sync::Arc;

use crate::config::{Config, NodeConfig};
use crate::object_store::{PlaceholderStore, RemoteStorage};
use crate::storage::Database;
use crate::upload::UploadPipeline;
use crate::AppState;

/// Field ceiling used by test state; small enough to exceed cheaply.
pub const TEST_MAX_UPLOAD_SIZE: u64 = 64 * 1024;

/// Create a test AppState backed by a temporary database and the placeholder
/// remote store. The database handle is returned for assertions.
pub fn test_state(temp_dir: &tempfile::TempDir) -> (Arc<AppState>, Database) {
    test_state_with(temp_dir, TEST_MAX_UPLOAD_SIZE, Arc::new(PlaceholderStore))
}

/// Like [`test_state`], with a chosen ceiling and remote storage backend.
pub fn test_state_with(
    temp_dir: &tempfile::TempDir,
    max_upload_size: u64,
    storage: Arc<dyn RemoteStorage>,
) -> (Arc<AppState>, Database) {
    let data_dir = temp_dir.path().join("data");

    let config = Config {
        node: NodeConfig {
            bind_address: "127.0.0.1:0".to_string(),
            data_dir: data_dir.to_string_lossy().to_string(),
        },
        max_upload_size,
    };

    let db = Database::open(&data_dir).expect("Failed to open test database");
    let pipeline = UploadPipeline::new(Arc::new(db.clone()), storage);

    (Arc::new(AppState { config, pipeline }), db)
}
