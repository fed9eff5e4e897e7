//! Console configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Console configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// The acting user: author of new posts and comments, reporter of reports.
    pub user_id: u64,
    /// Raw path segment handed to `GET /users/{user_id}/info`.
    pub profile_user_id: String,
    pub profile_delay: Duration,
    /// Profile loads that fail before the source recovers.
    pub profile_failures: u32,
    pub page_size: usize,
    pub toast_buffer: usize,
    /// Replacement fixture file. The embedded data set is used when unset.
    pub fixtures: Option<PathBuf>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            user_id: 101,
            profile_user_id: "123".to_string(),
            profile_delay: Duration::from_millis(1000),
            profile_failures: 0,
            page_size: 20,
            toast_buffer: 64,
            fixtures: None,
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            user_id: parsed("AGORA_USER_ID").unwrap_or(defaults.user_id),
            profile_user_id: env::var("AGORA_PROFILE_USER_ID")
                .unwrap_or(defaults.profile_user_id),
            profile_delay: parsed("AGORA_PROFILE_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.profile_delay),
            profile_failures: parsed("AGORA_PROFILE_FAILURES").unwrap_or(0),
            page_size: parsed("AGORA_PAGE_SIZE")
                .filter(|size: &usize| *size > 0)
                .unwrap_or(defaults.page_size),
            toast_buffer: parsed("AGORA_TOAST_BUFFER").unwrap_or(defaults.toast_buffer),
            fixtures: env::var("AGORA_FIXTURES").ok().map(PathBuf::from),
        }
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
