use crate::core::errors::UserHubError;
use crate::infrastructure::uploads::FileStore;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalFileStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn write(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, UserHubError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| UserHubError::UploadFailure(format!("Failed to create {}: {}", self.root.display(), e)))?;
        let path = self.root.join(file_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| UserHubError::UploadFailure(format!("Failed to write {}: {}", path.display(), e)))?;
        Ok(path)
    }
}
