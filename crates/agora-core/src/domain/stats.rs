use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Reporting window of the overview tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsPeriod {
    Day,
    #[default]
    Week,
    Month,
    Year,
}

impl FromStr for StatsPeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(StatsPeriod::Day),
            "week" => Ok(StatsPeriod::Week),
            "month" => Ok(StatsPeriod::Month),
            "year" => Ok(StatsPeriod::Year),
            other => Err(DomainError::Validation(format!(
                "unknown stats period `{other}`"
            ))),
        }
    }
}

/// One bar of the activity chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityPoint {
    pub label: String,
    pub posts: u32,
    pub comments: u32,
    pub views: u32,
}

/// Active users in a time-of-day bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyActivity {
    pub label: String,
    pub users: u32,
}

/// Overview tab numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub period: StatsPeriod,
    pub total_users: u32,
    pub active_users: u32,
    pub total_posts: u32,
    pub total_comments: u32,
    pub pending_reports: u32,
    pub views_today: u32,
    pub likes_today: u32,
    pub new_users_today: u32,
    pub users_trend: String,
    pub posts_trend: String,
    pub comments_trend: String,
    pub reports_trend: String,
    pub activity: Vec<ActivityPoint>,
    pub hourly_users: Vec<HourlyActivity>,
}

impl DashboardStats {
    /// Share of users active in the period, as a whole percentage.
    pub fn active_ratio(&self) -> u32 {
        if self.total_users == 0 {
            return 0;
        }
        ((u64::from(self.active_users) * 100) / u64::from(self.total_users)) as u32
    }

    /// Busiest bar of the activity chart by views.
    pub fn peak_day(&self) -> Option<&ActivityPoint> {
        self.activity.iter().max_by_key(|p| p.views)
    }
}
