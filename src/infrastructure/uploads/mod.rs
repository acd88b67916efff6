pub mod local;

use crate::core::errors::UserHubError;
use async_trait::async_trait;
use std::path::PathBuf;

#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store `bytes` under `file_name`, replacing any existing file of that name.
    async fn write(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, UserHubError>;
}
