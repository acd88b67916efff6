pub mod json_file;

use crate::core::errors::UserHubError;
use crate::core::models::user::User;
use async_trait::async_trait;

/// Durable copy of the user list. Every save is a full rewrite; there is no journal and no recovery
/// if the process dies between a store mutation and the save that follows it.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn save(&self, users: &[User]) -> Result<(), UserHubError>;
    async fn load(&self) -> Result<Vec<User>, UserHubError>;
    /// Keep a readable record of the latest form submission.
    async fn archive_form(&self, user: &User) -> Result<(), UserHubError>;
}
