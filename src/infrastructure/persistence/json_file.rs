use crate::core::errors::UserHubError;
use crate::core::models::user::User;
use crate::infrastructure::persistence::SnapshotStore;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

pub struct JsonFileSnapshot {
    snapshot_path: PathBuf,
    form_archive_path: PathBuf,
    // Serializes file writes so two saves never interleave their bytes.
    write_lock: Mutex<()>,
}

impl JsonFileSnapshot {
    pub fn new(snapshot_path: impl Into<PathBuf>, form_archive_path: impl Into<PathBuf>) -> Self {
        JsonFileSnapshot {
            snapshot_path: snapshot_path.into(),
            form_archive_path: form_archive_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    pub fn form_archive_path(&self) -> &Path {
        &self.form_archive_path
    }
}

fn encode_snapshot(users: &[User]) -> Result<Vec<u8>, UserHubError> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    users
        .serialize(&mut serializer)
        .map_err(|e| UserHubError::SnapshotError(format!("Failed to encode users: {}", e)))?;
    Ok(buf)
}

pub fn form_record(user: &User) -> String {
    format!(
        "ID: {}\nName: {}\nEmail: {}\nCreated At: {}\n\n",
        user.id,
        user.name,
        user.email,
        user.created_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    )
}

#[async_trait]
impl SnapshotStore for JsonFileSnapshot {
    async fn save(&self, users: &[User]) -> Result<(), UserHubError> {
        let data = encode_snapshot(users)?;
        let _guard = self.write_lock.lock().await;
        tokio::fs::write(&self.snapshot_path, data).await.map_err(|e| {
            UserHubError::SnapshotError(format!("Failed to write {}: {}", self.snapshot_path.display(), e))
        })
    }

    async fn load(&self) -> Result<Vec<User>, UserHubError> {
        let data = match tokio::fs::read(&self.snapshot_path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(UserHubError::SnapshotError(format!(
                    "Failed to read {}: {}",
                    self.snapshot_path.display(),
                    e
                )));
            }
        };
        serde_json::from_slice(&data)
            .map_err(|e| UserHubError::SnapshotError(format!("Failed to decode {}: {}", self.snapshot_path.display(), e)))
    }

    async fn archive_form(&self, user: &User) -> Result<(), UserHubError> {
        let _guard = self.write_lock.lock().await;
        tokio::fs::write(&self.form_archive_path, form_record(user))
            .await
            .map_err(|e| {
                UserHubError::SnapshotError(format!("Failed to write {}: {}", self.form_archive_path.display(), e))
            })
    }
}
