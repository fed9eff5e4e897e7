use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::target::{ContentKind, ContentRef};
use crate::error::{DomainError, DomainResult, require};

/// Review state of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Pending,
    Processed,
    Rejected,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "PENDING",
            ReportStatus::Processed => "PROCESSED",
            ReportStatus::Rejected => "REJECTED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Processed => "processed",
            ReportStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(ReportStatus::Pending),
            "PROCESSED" => Ok(ReportStatus::Processed),
            "REJECTED" => Ok(ReportStatus::Rejected),
            other => Err(DomainError::Validation(format!(
                "unknown report status `{other}`"
            ))),
        }
    }
}

/// A user's complaint about a post or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: u64,
    pub target: ContentRef,
    /// Post title or comment snippet, for the moderation table.
    pub target_title: String,
    pub reason: String,
    pub reporter_id: u64,
    pub reporter: String,
    pub status: ReportStatus,
    pub created_at: NaiveDateTime,
}

/// The moderation queue behind the admin "reports" tab.
#[derive(Debug, Clone, Default)]
pub struct ReportQueue {
    reports: Vec<Report>,
}

impl ReportQueue {
    pub fn new(reports: Vec<Report>) -> Self {
        Self { reports }
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn get(&self, id: u64) -> DomainResult<&Report> {
        self.reports
            .iter()
            .find(|r| r.id == id)
            .ok_or(DomainError::not_found("Report", id))
    }

    fn get_mut(&mut self, id: u64) -> DomainResult<&mut Report> {
        self.reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(DomainError::not_found("Report", id))
    }

    /// Reports against one kind of content, newest first. `term` matches the
    /// target title, reporter name or reason.
    pub fn list(
        &self,
        kind: ContentKind,
        status: Option<ReportStatus>,
        term: Option<&str>,
    ) -> Vec<&Report> {
        let term = term.map(str::to_lowercase);
        let mut reports: Vec<&Report> = self
            .reports
            .iter()
            .filter(|r| r.target.kind == kind)
            .filter(|r| status.map(|s| r.status == s).unwrap_or(true))
            .filter(|r| {
                term.as_deref()
                    .map(|t| {
                        r.target_title.to_lowercase().contains(t)
                            || r.reporter.to_lowercase().contains(t)
                            || r.reason.to_lowercase().contains(t)
                    })
                    .unwrap_or(true)
            })
            .collect();
        reports.sort_by_key(|r| Reverse(r.created_at));
        reports
    }

    pub fn pending_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.status == ReportStatus::Pending)
            .count()
    }

    /// Pending reports filed against `target`.
    pub fn pending_against(&self, target: ContentRef) -> usize {
        self.reports
            .iter()
            .filter(|r| r.target == target && r.status == ReportStatus::Pending)
            .count()
    }

    /// File a new report. A reporter may only have one pending report per
    /// target.
    pub fn file(
        &mut self,
        target: ContentRef,
        target_title: impl Into<String>,
        reason: &str,
        reporter_id: u64,
        reporter: impl Into<String>,
        now: NaiveDateTime,
    ) -> DomainResult<&Report> {
        let reason = require(reason, "Please enter a reason for the report.")?;

        let duplicate = self.reports.iter().any(|r| {
            r.target == target && r.reporter_id == reporter_id && r.status == ReportStatus::Pending
        });
        if duplicate {
            return Err(DomainError::Conflict(format!(
                "You have already reported this {}.",
                target.kind
            )));
        }

        let id = self.reports.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        self.reports.push(Report {
            id,
            target,
            target_title: target_title.into(),
            reason,
            reporter_id,
            reporter: reporter.into(),
            status: ReportStatus::Pending,
            created_at: now,
        });
        tracing::debug!(report_id = id, item = %target, "report filed");
        Ok(&self.reports[self.reports.len() - 1])
    }

    /// Accept a pending report.
    pub fn process(&mut self, id: u64) -> DomainResult<&Report> {
        self.resolve(id, ReportStatus::Processed)
    }

    /// Dismiss a pending report.
    pub fn reject(&mut self, id: u64) -> DomainResult<&Report> {
        self.resolve(id, ReportStatus::Rejected)
    }

    fn resolve(&mut self, id: u64, status: ReportStatus) -> DomainResult<&Report> {
        let report = self.get_mut(id)?;
        if report.status != ReportStatus::Pending {
            return Err(DomainError::Conflict(format!(
                "Report {id} is already {}.",
                report.status.label()
            )));
        }
        report.status = status;
        Ok(report)
    }

    /// Re-label a report that has already been reviewed. Returns the previous
    /// status.
    pub fn set_status(&mut self, id: u64, status: ReportStatus) -> DomainResult<ReportStatus> {
        let report = self.get_mut(id)?;
        if report.status == ReportStatus::Pending {
            return Err(DomainError::Conflict(format!(
                "Report {id} is pending; process or reject it instead."
            )));
        }
        let previous = report.status;
        report.status = status;
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, day)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn report(id: u64, target: ContentRef, status: ReportStatus, day: u32) -> Report {
        Report {
            id,
            target,
            target_title: format!("target {}", target.id),
            reason: "contains profanity".to_string(),
            reporter_id: 1000 + id,
            reporter: format!("user{id}"),
            status,
            created_at: at(day),
        }
    }

    fn queue() -> ReportQueue {
        ReportQueue::new(vec![
            report(1, ContentRef::post(10), ReportStatus::Pending, 20),
            report(2, ContentRef::post(11), ReportStatus::Processed, 19),
            report(3, ContentRef::post(12), ReportStatus::Rejected, 18),
            report(4, ContentRef::comment(55), ReportStatus::Pending, 21),
        ])
    }

    #[test]
    fn list_filters_by_kind_and_status() {
        let queue = queue();
        let posts: Vec<u64> = queue
            .list(ContentKind::Post, None, None)
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(posts, vec![1, 2, 3]);

        let pending = queue.list(ContentKind::Post, Some(ReportStatus::Pending), None);
        assert_eq!(pending.len(), 1);
        assert_eq!(queue.list(ContentKind::Comment, None, Some("USER4")).len(), 1);
    }

    #[test]
    fn process_and_reject_only_from_pending() {
        let mut queue = queue();
        assert_eq!(queue.process(1).unwrap().status, ReportStatus::Processed);
        assert!(matches!(queue.reject(1), Err(DomainError::Conflict(_))));
        assert_eq!(queue.get(1).unwrap().status, ReportStatus::Processed);
        assert_eq!(queue.reject(4).unwrap().status, ReportStatus::Rejected);
        assert_eq!(queue.pending_count(), 0);
    }

    #[test]
    fn reviewed_reports_can_be_relabelled() {
        let mut queue = queue();
        assert_eq!(
            queue.set_status(2, ReportStatus::Pending).unwrap(),
            ReportStatus::Processed
        );
        assert_eq!(queue.get(2).unwrap().status, ReportStatus::Pending);
        assert!(queue.set_status(1, ReportStatus::Rejected).is_err());
    }

    #[test]
    fn filing_requires_reason() {
        let mut queue = queue();
        assert!(
            queue
                .file(ContentRef::post(10), "t", "  ", 7, "me", at(22))
                .is_err()
        );
        assert_eq!(queue.len(), 4);

        let filed = queue
            .file(ContentRef::post(10), "t", "spam", 7, "me", at(22))
            .unwrap();
        assert_eq!(filed.id, 5);
        assert_eq!(filed.status, ReportStatus::Pending);
        assert_eq!(queue.pending_against(ContentRef::post(10)), 2);
    }

    #[test]
    fn duplicate_pending_report_is_refused() {
        let mut queue = queue();
        queue
            .file(ContentRef::comment(55), "c", "spam", 7, "me", at(22))
            .unwrap();
        assert!(matches!(
            queue.file(ContentRef::comment(55), "c", "again", 7, "me", at(22)),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(
            "processed".parse::<ReportStatus>().unwrap(),
            ReportStatus::Processed
        );
        assert!("closed".parse::<ReportStatus>().is_err());
    }
}
