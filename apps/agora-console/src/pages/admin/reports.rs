//! Moderation queue: reports filed against posts and comments.

use chrono::NaiveDateTime;

use agora_core::domain::{Author, ContentKind, ContentRef, Report, ReportQueue, ReportStatus};
use agora_shared::Endpoint;
use agora_shared::dto::{ReportInfo, ReportRequest, ReportStatusRequest};

use crate::error::UiResult;
use crate::render;
use crate::reply::Reply;

fn noun(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Post => "Post",
        ContentKind::Comment => "Comment",
    }
}

pub struct ReportsPage {
    queue: ReportQueue,
}

impl ReportsPage {
    pub fn new(reports: Vec<Report>) -> Self {
        Self {
            queue: ReportQueue::new(reports),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.queue.pending_count()
    }

    pub fn pending_against(&self, target: ContentRef) -> usize {
        self.queue.pending_against(target)
    }

    pub fn list(
        &self,
        kind: ContentKind,
        status: Option<ReportStatus>,
        search: Option<&str>,
    ) -> UiResult<Reply> {
        let reports: Vec<ReportInfo> = self
            .queue
            .list(kind, status, search)
            .into_iter()
            .map(ReportInfo::from)
            .collect();
        let endpoint = match kind {
            ContentKind::Post => Endpoint::PostReportsList,
            ContentKind::Comment => Endpoint::CommentReportsList,
        };
        Ok(Reply::view(render::reports(&reports), &reports)?.sent(endpoint, &[]))
    }

    /// File a report from a post or comment page.
    pub fn file(
        &mut self,
        target: ContentRef,
        target_title: &str,
        reason: &str,
        reporter: &Author,
        now: NaiveDateTime,
    ) -> UiResult<Reply> {
        let report = self
            .queue
            .file(target, target_title, reason, reporter.id, reporter.name.as_str(), now)?;
        let request = ReportRequest {
            reason: report.reason.clone(),
        };
        tracing::info!(report_id = report.id, item = %target, "Report filed");

        let endpoint = match target.kind {
            ContentKind::Post => Endpoint::PostReport,
            ContentKind::Comment => Endpoint::CommentReport,
        };
        Reply::done(format!("{} report submitted.", noun(target.kind)))
            .sent_with(endpoint, &[target.id], &request)
    }

    fn reviewed(report: &Report, message: String) -> UiResult<Reply> {
        let info = ReportInfo::from(report);
        let body = ReportStatusRequest {
            status: report.status,
        };
        Reply::done(message)
            .with_data(&info)?
            .sent_with(Endpoint::ReportStatusUpdate, &[report.id], &body)
    }

    pub fn process(&mut self, report_id: u64) -> UiResult<Reply> {
        let report = self.queue.process(report_id)?;
        tracing::info!(report_id, "Report processed");
        Self::reviewed(report, format!("{} report processed.", noun(report.target.kind)))
    }

    pub fn reject(&mut self, report_id: u64) -> UiResult<Reply> {
        let report = self.queue.reject(report_id)?;
        tracing::info!(report_id, "Report rejected");
        Self::reviewed(report, format!("{} report rejected.", noun(report.target.kind)))
    }

    pub fn set_status(&mut self, report_id: u64, status: ReportStatus) -> UiResult<Reply> {
        let previous = self.queue.set_status(report_id, status)?;
        tracing::info!(report_id, from = %previous, to = %status, "Report status changed");
        let report = self.queue.get(report_id)?;
        Self::reviewed(
            report,
            format!(
                "{} report status changed to {}.",
                noun(report.target.kind),
                status.label()
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn report(id: u64, target: ContentRef, status: ReportStatus) -> Report {
        Report {
            id,
            target,
            target_title: format!("target {}", target.id),
            reason: "spam".to_string(),
            reporter_id: 200 + id,
            reporter: format!("user{id}"),
            status,
            created_at: at(id as u32),
        }
    }

    fn page() -> ReportsPage {
        ReportsPage::new(vec![
            report(1, ContentRef::post(3), ReportStatus::Pending),
            report(2, ContentRef::post(4), ReportStatus::Processed),
            report(3, ContentRef::comment(7), ReportStatus::Pending),
        ])
    }

    #[test]
    fn filing_needs_a_reason_and_is_announced() {
        let mut page = page();
        let me = Author::new(101, "Hong Gildong");
        assert!(page.file(ContentRef::post(3), "target 3", "  ", &me, at(9)).is_err());
        assert_eq!(page.pending_count(), 2);

        let reply = page.file(ContentRef::post(3), "target 3", "ads", &me, at(9)).unwrap();
        assert_eq!(reply.toast.as_deref(), Some("Post report submitted."));
        assert_eq!(reply.request.unwrap().path, "/reports/posts/3");
        assert_eq!(page.pending_against(ContentRef::post(3)), 2);
    }

    #[test]
    fn only_pending_reports_can_be_processed() {
        let mut page = page();
        let reply = page.process(1).unwrap();
        assert_eq!(reply.toast.as_deref(), Some("Post report processed."));
        assert_eq!(reply.data.unwrap()["status"], "PROCESSED");
        assert!(page.reject(1).is_err());
        assert!(page.process(2).is_err());
    }

    #[test]
    fn reviewed_reports_can_be_relabelled() {
        let mut page = page();
        assert!(page.set_status(3, ReportStatus::Rejected).is_err());
        let reply = page.set_status(2, ReportStatus::Pending).unwrap();
        assert_eq!(
            reply.toast.as_deref(),
            Some("Post report status changed to pending.")
        );
        assert_eq!(page.pending_count(), 3);
    }

    #[test]
    fn listing_is_split_by_kind() {
        let page = page();
        let posts = page.list(ContentKind::Post, None, None).unwrap();
        assert_eq!(posts.data.unwrap().as_array().unwrap().len(), 2);
        let comments = page
            .list(ContentKind::Comment, Some(ReportStatus::Pending), Some("SPAM"))
            .unwrap();
        assert_eq!(comments.request.unwrap().endpoint, Endpoint::CommentReportsList);
        assert_eq!(comments.data.unwrap()[0]["report_id"], 3);
    }
}
