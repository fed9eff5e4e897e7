use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    Comment,
    Like,
    Reply,
    System,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NotificationKind::Comment => "COMMENT",
            NotificationKind::Like => "LIKE",
            NotificationKind::Reply => "REPLY",
            NotificationKind::System => "SYSTEM",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

/// The viewer's notification list.
#[derive(Debug, Clone, Default)]
pub struct Inbox {
    notifications: Vec<Notification>,
}

impl Inbox {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self { notifications }
    }

    pub fn all(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    pub fn mark_read(&mut self, id: u64) -> DomainResult<&Notification> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(DomainError::not_found("Notification", id))?;
        notification.is_read = true;
        Ok(notification)
    }

    /// Mark everything read. Returns how many notifications changed.
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for notification in self.notifications.iter_mut().filter(|n| !n.is_read) {
            notification.is_read = true;
            changed += 1;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn inbox() -> Inbox {
        let at = NaiveDate::from_ymd_opt(2025, 5, 20)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        let n = |id, kind, is_read| Notification {
            id,
            kind,
            message: format!("notification {id}"),
            is_read,
            created_at: at,
        };
        Inbox::new(vec![
            n(1, NotificationKind::Comment, false),
            n(2, NotificationKind::Like, false),
            n(3, NotificationKind::Reply, true),
            n(4, NotificationKind::System, true),
        ])
    }

    #[test]
    fn mark_read_touches_only_that_notification() {
        let mut inbox = inbox();
        let before = inbox.all().to_vec();
        inbox.mark_read(1).unwrap();

        for (old, new) in before.iter().zip(inbox.all()) {
            if old.id == 1 {
                assert!(new.is_read);
            } else {
                assert_eq!(old, new);
            }
        }
        assert_eq!(inbox.unread_count(), 1);
    }

    #[test]
    fn mark_all_read_sets_every_flag() {
        let mut inbox = inbox();
        assert_eq!(inbox.mark_all_read(), 2);
        assert!(inbox.all().iter().all(|n| n.is_read));
        assert_eq!(inbox.mark_all_read(), 0);
    }

    #[test]
    fn unknown_notification_is_not_found() {
        let mut inbox = inbox();
        assert!(inbox.mark_read(99).is_err());
        assert_eq!(inbox.unread_count(), 2);
    }
}
