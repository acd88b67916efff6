pub mod api;
pub mod client;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use crate::core::errors::UserHubError;
pub use crate::core::models::user::User;
pub use crate::core::services::UserService;

#[cfg(test)]
mod tests; // Include integration tests
