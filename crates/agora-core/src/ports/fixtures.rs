use async_trait::async_trait;

use crate::domain::{
    BlindedItem, Category, Comment, DashboardStats, ErrorLog, Notification, Post, Report,
    StatsPeriod, SystemLogEntry, SystemSettings, TrashedItem, User, UserActionLog,
};

/// Source of the mock data each page seeds itself with on mount.
///
/// Every call hands out a fresh copy; nothing written to a page's local state
/// ever flows back here.
#[async_trait]
pub trait BoardFixtures: Send + Sync {
    async fn posts(&self) -> Result<Vec<Post>, FixtureError>;

    /// Comments of one post, in posting order.
    async fn comments(&self, post_id: u64) -> Result<Vec<Comment>, FixtureError>;

    async fn reports(&self) -> Result<Vec<Report>, FixtureError>;

    async fn blinded(&self) -> Result<Vec<BlindedItem>, FixtureError>;

    async fn users(&self) -> Result<Vec<User>, FixtureError>;

    async fn categories(&self) -> Result<Vec<Category>, FixtureError>;

    async fn notifications(&self) -> Result<Vec<Notification>, FixtureError>;

    async fn trash(&self) -> Result<Vec<TrashedItem>, FixtureError>;

    async fn system_logs(&self) -> Result<Vec<SystemLogEntry>, FixtureError>;

    async fn user_action_logs(&self) -> Result<Vec<UserActionLog>, FixtureError>;

    async fn error_logs(&self) -> Result<Vec<ErrorLog>, FixtureError>;

    async fn dashboard_stats(&self, period: StatsPeriod) -> Result<DashboardStats, FixtureError>;

    async fn settings(&self) -> Result<SystemSettings, FixtureError>;
}

/// Fixture loading errors.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Fixture data is malformed: {0}")]
    Malformed(String),

    #[error("No fixture data for {0}")]
    Missing(String),
}
