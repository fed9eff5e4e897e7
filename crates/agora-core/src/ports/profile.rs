use async_trait::async_trait;

use crate::domain::User;

/// Loads the "my profile" page data (`GET /users/{user_id}/info`).
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// `user_id` is the raw path segment; it may not even be a number.
    async fn user_info(&self, user_id: &str) -> Result<User, ProfileError>;
}

/// Profile loading errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("Invalid request: `{0}` is not a user id")]
    InvalidUserId(String),

    #[error("User {0} not found")]
    NotFound(u64),

    #[error("Failed to load profile: {0}")]
    Unavailable(String),
}
