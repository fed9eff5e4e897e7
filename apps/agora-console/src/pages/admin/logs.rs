use std::cmp::Reverse;

use agora_core::domain::{ErrorLog, LogQuery, SystemLogEntry, UserActionLog, paginate};
use agora_shared::Endpoint;
use agora_shared::dto::{ErrorLogInfo, LogPage, SystemLogInfo, UserActionLogInfo};

use crate::commands::LogArgs;
use crate::error::UiResult;
use crate::render;
use crate::reply::Reply;

/// Log viewer with its three tabs. Entries are shown newest first.
pub struct LogsPage {
    system: Vec<SystemLogEntry>,
    actions: Vec<UserActionLog>,
    errors: Vec<ErrorLog>,
}

impl LogsPage {
    pub fn new(
        mut system: Vec<SystemLogEntry>,
        mut actions: Vec<UserActionLog>,
        mut errors: Vec<ErrorLog>,
    ) -> Self {
        system.sort_by_key(|e| Reverse(e.timestamp));
        actions.sort_by_key(|e| Reverse(e.timestamp));
        errors.sort_by_key(|e| Reverse(e.timestamp));
        Self {
            system,
            actions,
            errors,
        }
    }

    pub fn system(&self, query: &LogQuery, args: &LogArgs) -> UiResult<Reply> {
        let entries: Vec<SystemLogInfo> = self
            .system
            .iter()
            .filter(|e| query.admits_system(e))
            .map(SystemLogInfo::from)
            .collect();
        let page = LogPage::from(paginate(entries, args.page, args.size)?);
        Ok(Reply::view(render::system_logs(&page), &page)?.sent(Endpoint::SystemLogs, &[]))
    }

    pub fn actions(&self, query: &LogQuery, args: &LogArgs) -> UiResult<Reply> {
        let entries: Vec<UserActionLogInfo> = self
            .actions
            .iter()
            .filter(|e| query.admits_action(e))
            .map(UserActionLogInfo::from)
            .collect();
        let page = LogPage::from(paginate(entries, args.page, args.size)?);
        Ok(Reply::view(render::action_logs(&page), &page)?.sent(Endpoint::UserActionLogs, &[]))
    }

    pub fn errors(&self, query: &LogQuery, args: &LogArgs) -> UiResult<Reply> {
        let entries: Vec<ErrorLogInfo> = self
            .errors
            .iter()
            .filter(|e| query.admits_error(e))
            .map(ErrorLogInfo::from)
            .collect();
        let page = LogPage::from(paginate(entries, args.page, args.size)?);
        Ok(Reply::view(render::error_logs(&page), &page)?.sent(Endpoint::ErrorLogs, &[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::domain::{LogLevel, Severity};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 24)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn args(page: usize, size: usize) -> LogArgs {
        LogArgs {
            search: None,
            page,
            size,
        }
    }

    fn page() -> LogsPage {
        let entry = |id: u64, level: LogLevel, message: &str| SystemLogEntry {
            id,
            level,
            message: message.to_string(),
            source: "auth".to_string(),
            user_id: None,
            timestamp: at(id as u32),
        };
        let error = |id: u64, severity: Severity| ErrorLog {
            id,
            severity,
            error_code: format!("E{id:03}"),
            message: "database timeout".to_string(),
            timestamp: at(id as u32),
            resolved: false,
        };
        LogsPage::new(
            vec![
                entry(1, LogLevel::Info, "User logged in"),
                entry(2, LogLevel::Error, "Login failed"),
                entry(3, LogLevel::Info, "User logged out"),
            ],
            Vec::new(),
            vec![error(1, Severity::High), error(2, Severity::Low)],
        )
    }

    #[test]
    fn system_log_filters_and_pages_newest_first() {
        let page = page();
        let query = LogQuery {
            level: Some(LogLevel::Info),
            ..LogQuery::default()
        };
        let reply = page.system(&query, &args(1, 1)).unwrap();
        let data = reply.data.unwrap();
        assert_eq!(data["total_count"], 2);
        assert_eq!(data["total_pages"], 2);
        assert_eq!(data["logs"][0]["log_id"], 3);
    }

    #[test]
    fn error_log_filters_by_severity() {
        let page = page();
        let query = LogQuery {
            severity: Some(Severity::High),
            search: Some("TIMEOUT".to_string()),
            ..LogQuery::default()
        };
        let reply = page.errors(&query, &args(1, 50)).unwrap();
        assert_eq!(reply.data.unwrap()["logs"][0]["error_code"], "E001");
        assert!(page.actions(&LogQuery::default(), &args(0, 50)).is_err());
    }
}
