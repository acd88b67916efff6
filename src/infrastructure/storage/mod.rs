use crate::core::errors::UserHubError;
use crate::core::models::user::User;
use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};

#[async_trait]
pub trait Storage: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, UserHubError>;
    async fn create_user(&self, name: String, email: String) -> Result<User, UserHubError>;
    async fn update_user(&self, user_id: i64, name: String, email: String) -> Result<User, UserHubError>;
    async fn delete_user(&self, user_id: i64) -> Result<(), UserHubError>;
}

/// Next ID is one past the highest ID currently stored, so freed IDs at the top are handed out again.
pub(crate) fn next_user_id(users: &[User]) -> i64 {
    users.iter().map(|u| u.id).max().unwrap_or(0) + 1
}

pub(crate) fn creation_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

pub(crate) fn apply_update(users: &mut [User], user_id: i64, name: String, email: String) -> Result<User, UserHubError> {
    let user = users
        .iter_mut()
        .find(|u| u.id == user_id)
        .ok_or_else(|| UserHubError::UserNotFound(user_id.to_string()))?;
    user.name = name;
    user.email = email;
    Ok(user.clone())
}

pub(crate) fn apply_delete(users: &mut Vec<User>, user_id: i64) -> Result<(), UserHubError> {
    let index = users
        .iter()
        .position(|u| u.id == user_id)
        .ok_or_else(|| UserHubError::UserNotFound(user_id.to_string()))?;
    users.remove(index);
    Ok(())
}

pub mod in_memory;
pub mod unsynchronized;
