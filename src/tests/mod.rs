mod api_tests;

use crate::config::{Config, DEFAULT_MAX_UPLOAD_BYTES, StoreMode};
use crate::core::services::UserService;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub fn test_config(dir: &Path) -> Config {
    Config {
        snapshot_path: dir.join("users.json"),
        uploads_dir: dir.join("uploads"),
        form_archive_path: dir.join("form_submissions.txt"),
        max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        store_mode: StoreMode::Locked,
        restore_snapshot: false,
        ..Config::default()
    }
}

/// Service backed by a fresh temporary directory. Keep the `TempDir` alive for the test's duration.
pub async fn create_test_service() -> (TempDir, Arc<UserService>) {
    let dir = tempfile::tempdir().unwrap();
    let service = UserService::from_config(&test_config(dir.path())).await.unwrap();
    (dir, Arc::new(service))
}
