use crate::core::errors::UserHubError;
use crate::core::models::user::User;
use crate::infrastructure::storage::{Storage, apply_delete, apply_update, creation_timestamp, next_user_id};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Store with a check-then-act create: the next ID is read under one guard
/// and the user appended under another, so overlapping creates can be handed the same ID.
#[derive(Clone)]
pub struct UnsynchronizedStorage {
    users: Arc<RwLock<Vec<User>>>,
}

impl UnsynchronizedStorage {
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    pub fn with_users(users: Vec<User>) -> Self {
        UnsynchronizedStorage {
            users: Arc::new(RwLock::new(users)),
        }
    }
}

impl Default for UnsynchronizedStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for UnsynchronizedStorage {
    async fn list_users(&self) -> Result<Vec<User>, UserHubError> {
        let users = self.users.read().await;
        Ok(users.clone())
    }

    async fn create_user(&self, name: String, email: String) -> Result<User, UserHubError> {
        let user_id = {
            let users = self.users.read().await;
            next_user_id(&users)
        };
        // Other requests may run here and compute the same ID.
        tokio::task::yield_now().await;

        let user = User {
            id: user_id,
            name,
            email,
            created_at: creation_timestamp(),
        };
        let mut users = self.users.write().await;
        users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, user_id: i64, name: String, email: String) -> Result<User, UserHubError> {
        let mut users = self.users.write().await;
        apply_update(&mut users, user_id, name, email)
    }

    async fn delete_user(&self, user_id: i64) -> Result<(), UserHubError> {
        let mut users = self.users.write().await;
        apply_delete(&mut users, user_id)
    }
}
