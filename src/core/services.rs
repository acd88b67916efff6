use crate::config::{Config, StoreMode};
use crate::core::errors::UserHubError;
use crate::core::models::user::User;
use crate::infrastructure::persistence::{SnapshotStore, json_file::JsonFileSnapshot};
use crate::infrastructure::storage::{
    Storage, in_memory::InMemoryStorage, unsynchronized::UnsynchronizedStorage,
};
use crate::infrastructure::uploads::{FileStore, local::LocalFileStore};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub struct UserService {
    storage: Arc<dyn Storage>,
    snapshots: Arc<dyn SnapshotStore>,
    uploads: Arc<dyn FileStore>,
    max_upload_bytes: usize,
    // Held from reading the store until the snapshot is written, so saves land in store order.
    snapshot_lock: Mutex<()>,
}

impl UserService {
    pub fn new(
        storage: Arc<dyn Storage>,
        snapshots: Arc<dyn SnapshotStore>,
        uploads: Arc<dyn FileStore>,
        max_upload_bytes: usize,
    ) -> Self {
        UserService {
            storage,
            snapshots,
            uploads,
            max_upload_bytes,
            snapshot_lock: Mutex::new(()),
        }
    }

    /// Wire the store, snapshot file and uploads directory described by `config`.
    pub async fn from_config(config: &Config) -> Result<Self, UserHubError> {
        let snapshots = Arc::new(JsonFileSnapshot::new(&config.snapshot_path, &config.form_archive_path));
        let seed = if config.restore_snapshot {
            let users = snapshots.load().await?;
            info!(count = users.len(), path = %config.snapshot_path.display(), "Restored users from snapshot");
            users
        } else {
            Vec::new()
        };

        let storage: Arc<dyn Storage> = match config.store_mode {
            StoreMode::Locked => Arc::new(InMemoryStorage::with_users(seed)),
            StoreMode::Unsynchronized => {
                warn!("Using unsynchronized store: concurrent creates may receive duplicate IDs");
                Arc::new(UnsynchronizedStorage::with_users(seed))
            }
        };
        let uploads = Arc::new(LocalFileStore::new(&config.uploads_dir));

        Ok(Self::new(storage, snapshots, uploads, config.max_upload_bytes))
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub async fn list_users(&self) -> Result<Vec<User>, UserHubError> {
        self.storage.list_users().await
    }

    pub async fn create_user(&self, name: String, email: String) -> Result<User, UserHubError> {
        let user = self.storage.create_user(name, email).await?;
        info!(user_id = user.id, "User created");
        self.persist_snapshot().await;
        Ok(user)
    }

    pub async fn update_user(&self, user_id: &str, name: String, email: String) -> Result<User, UserHubError> {
        let id = parse_user_id(user_id)?;
        let user = self.storage.update_user(id, name, email).await?;
        info!(user_id = user.id, "User updated");
        self.persist_snapshot().await;
        Ok(user)
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<(), UserHubError> {
        let id = parse_user_id(user_id)?;
        self.storage.delete_user(id).await?;
        info!(user_id = id, "User deleted");
        self.persist_snapshot().await;
        Ok(())
    }

    /// Create a user from a form submission and archive the submission as text.
    pub async fn submit_form(&self, name: String, email: String) -> Result<User, UserHubError> {
        let user = self.storage.create_user(name, email).await?;
        info!(user_id = user.id, "User created from form");
        self.persist_snapshot().await;
        if let Err(e) = self.snapshots.archive_form(&user).await {
            warn!(error = %e, "Failed to archive form submission");
        }
        Ok(user)
    }

    /// Store an uploaded file under its base name. Returns the name it was stored as.
    pub async fn store_upload(&self, file_name: &str, bytes: &[u8]) -> Result<String, UserHubError> {
        let name = sanitize_file_name(file_name)?;
        if bytes.len() > self.max_upload_bytes {
            return Err(UserHubError::InvalidUpload(format!(
                "file exceeds the {} byte limit",
                self.max_upload_bytes
            )));
        }
        let path = self.uploads.write(&name, bytes).await?;
        info!(file = %path.display(), size = bytes.len(), "File uploaded");
        Ok(name)
    }

    // Best effort: a failed write is logged and the request still succeeds.
    async fn persist_snapshot(&self) {
        let _guard = self.snapshot_lock.lock().await;
        let result = match self.storage.list_users().await {
            Ok(users) => self.snapshots.save(&users).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            warn!(error = %e, "Failed to persist user snapshot");
        }
    }
}

/// IDs arrive as path text and only match a user whose ID prints the same way, so `02`, `+2` and
/// ` 2` are not user 2.
fn parse_user_id(raw: &str) -> Result<i64, UserHubError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| id.to_string() == raw)
        .ok_or_else(|| UserHubError::UserNotFound(raw.to_string()))
}

fn sanitize_file_name(raw: &str) -> Result<String, UserHubError> {
    // Clients on Windows may send backslash-separated paths.
    let last = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let name = Path::new(last)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    if name.is_empty() || name == "." || name == ".." {
        return Err(UserHubError::InvalidUpload(format!("invalid file name `{}`", raw)));
    }
    Ok(name.to_string())
}
