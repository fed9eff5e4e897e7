//! Stand-in for `GET /users/{user_id}/info`.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use agora_core::domain::{Role, User};
use agora_core::ports::{ProfileError, ProfileSource};

/// Answers every numeric id with the same mock account after a fixed delay.
pub struct MockProfileSource {
    delay: Duration,
    /// Calls left that fail before the source recovers.
    failures: AtomicU32,
}

impl MockProfileSource {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            failures: AtomicU32::new(0),
        }
    }

    /// Make the next `count` calls fail with [`ProfileError::Unavailable`].
    pub fn fail_next(self, count: u32) -> Self {
        self.failures.store(count, Ordering::SeqCst);
        self
    }

    fn take_failure(&self) -> bool {
        self.failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    fn account(user_id: u64) -> User {
        let created_at = NaiveDate::from_ymd_opt(2024, 10, 1)
            .and_then(|d| d.and_hms_opt(12, 34, 56))
            .unwrap_or_default();
        User {
            id: user_id,
            username: "johndoe".to_string(),
            nickname: "Hong Gildong".to_string(),
            email: "johndoe@example.com".to_string(),
            role: Role::User,
            ban: None,
            created_at,
            post_count: 0,
            comment_count: 0,
        }
    }
}

impl Default for MockProfileSource {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

#[async_trait]
impl ProfileSource for MockProfileSource {
    async fn user_info(&self, user_id: &str) -> Result<User, ProfileError> {
        tracing::debug!(user_id, delay_ms = self.delay.as_millis() as u64, "Loading profile");
        tokio::time::sleep(self.delay).await;

        if self.take_failure() {
            tracing::warn!(user_id, "Profile source unavailable");
            return Err(ProfileError::Unavailable(
                "Failed to load the profile information.".to_string(),
            ));
        }

        let id = user_id
            .trim()
            .parse::<u64>()
            .map_err(|_| ProfileError::InvalidUserId(user_id.to_string()))?;
        Ok(Self::account(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn loads_after_the_delay() {
        let source = MockProfileSource::default();
        let started = tokio::time::Instant::now();
        let user = source.user_info("123").await.unwrap();
        assert_eq!(user.id, 123);
        assert_eq!(user.username, "johndoe");
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn non_numeric_id_is_invalid() {
        let source = MockProfileSource::new(Duration::ZERO);
        assert_eq!(
            source.user_info("abc").await,
            Err(ProfileError::InvalidUserId("abc".to_string()))
        );
    }

    #[tokio::test]
    async fn recovers_after_scripted_failures() {
        let source = MockProfileSource::new(Duration::ZERO).fail_next(1);
        assert!(matches!(
            source.user_info("123").await,
            Err(ProfileError::Unavailable(_))
        ));
        assert!(source.user_info("123").await.is_ok());
    }
}
