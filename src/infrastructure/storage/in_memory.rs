use crate::core::errors::UserHubError;
use crate::core::models::user::User;
use crate::infrastructure::storage::{Storage, apply_delete, apply_update, creation_timestamp, next_user_id};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// User list behind a single lock: every operation runs start to finish under it.
pub struct InMemoryStorage {
    users: Mutex<Vec<User>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    pub fn with_users(users: Vec<User>) -> Self {
        InMemoryStorage {
            users: Mutex::new(users),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn list_users(&self) -> Result<Vec<User>, UserHubError> {
        Ok(self.users.lock().await.clone())
    }

    async fn create_user(&self, name: String, email: String) -> Result<User, UserHubError> {
        let mut users = self.users.lock().await;
        let user = User {
            id: next_user_id(&users),
            name,
            email,
            created_at: creation_timestamp(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, user_id: i64, name: String, email: String) -> Result<User, UserHubError> {
        let mut users = self.users.lock().await;
        apply_update(&mut users, user_id, name, email)
    }

    async fn delete_user(&self, user_id: i64) -> Result<(), UserHubError> {
        let mut users = self.users.lock().await;
        apply_delete(&mut users, user_id)
    }
}
