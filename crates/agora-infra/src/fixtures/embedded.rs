//! Fixtures parsed from a JSON document, by default the one compiled into the
//! binary.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use agora_core::domain::{
    BlindedItem, Category, Comment, DashboardStats, ErrorLog, Notification, Post, Report,
    StatsPeriod, SystemLogEntry, SystemSettings, TrashedItem, User, UserActionLog,
};
use agora_core::ports::{BoardFixtures, FixtureError};

const BOARD_JSON: &str = include_str!("board.json");

#[derive(Debug, Clone, Deserialize)]
struct FixtureSet {
    posts: Vec<Post>,
    comments: Vec<Comment>,
    reports: Vec<Report>,
    blinded: Vec<BlindedItem>,
    users: Vec<User>,
    categories: Vec<Category>,
    notifications: Vec<Notification>,
    trash: Vec<TrashedItem>,
    system_logs: Vec<SystemLogEntry>,
    user_action_logs: Vec<UserActionLog>,
    error_logs: Vec<ErrorLog>,
    stats: Vec<DashboardStats>,
    settings: SystemSettings,
}

/// Read-only mock data. Every accessor hands out a fresh copy.
#[derive(Debug, Clone)]
pub struct StaticFixtures {
    set: FixtureSet,
}

impl StaticFixtures {
    /// The data set shipped with the console.
    pub fn embedded() -> Result<Self, FixtureError> {
        Self::from_json(BOARD_JSON)
    }

    pub fn from_json(raw: &str) -> Result<Self, FixtureError> {
        let set: FixtureSet =
            serde_json::from_str(raw).map_err(|e| FixtureError::Malformed(e.to_string()))?;

        tracing::debug!(
            posts = set.posts.len(),
            comments = set.comments.len(),
            users = set.users.len(),
            categories = set.categories.len(),
            "Fixtures parsed"
        );
        Ok(Self { set })
    }

    /// Load a replacement data set from disk.
    pub fn from_path(path: &Path) -> Result<Self, FixtureError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| FixtureError::Missing(format!("{}: {e}", path.display())))?;
        tracing::info!(path = %path.display(), "Loading fixtures from file");
        Self::from_json(&raw)
    }
}

#[async_trait]
impl BoardFixtures for StaticFixtures {
    async fn posts(&self) -> Result<Vec<Post>, FixtureError> {
        Ok(self.set.posts.clone())
    }

    async fn comments(&self, post_id: u64) -> Result<Vec<Comment>, FixtureError> {
        Ok(self
            .set
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn reports(&self) -> Result<Vec<Report>, FixtureError> {
        Ok(self.set.reports.clone())
    }

    async fn blinded(&self) -> Result<Vec<BlindedItem>, FixtureError> {
        Ok(self.set.blinded.clone())
    }

    async fn users(&self) -> Result<Vec<User>, FixtureError> {
        Ok(self.set.users.clone())
    }

    async fn categories(&self) -> Result<Vec<Category>, FixtureError> {
        Ok(self.set.categories.clone())
    }

    async fn notifications(&self) -> Result<Vec<Notification>, FixtureError> {
        Ok(self.set.notifications.clone())
    }

    async fn trash(&self) -> Result<Vec<TrashedItem>, FixtureError> {
        Ok(self.set.trash.clone())
    }

    async fn system_logs(&self) -> Result<Vec<SystemLogEntry>, FixtureError> {
        Ok(self.set.system_logs.clone())
    }

    async fn user_action_logs(&self) -> Result<Vec<UserActionLog>, FixtureError> {
        Ok(self.set.user_action_logs.clone())
    }

    async fn error_logs(&self) -> Result<Vec<ErrorLog>, FixtureError> {
        Ok(self.set.error_logs.clone())
    }

    async fn dashboard_stats(&self, period: StatsPeriod) -> Result<DashboardStats, FixtureError> {
        self.set
            .stats
            .iter()
            .find(|s| s.period == period)
            .cloned()
            .ok_or_else(|| FixtureError::Missing(format!("{period:?} stats")))
    }

    async fn settings(&self) -> Result<SystemSettings, FixtureError> {
        Ok(self.set.settings.clone())
    }
}
