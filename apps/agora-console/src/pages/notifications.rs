use agora_core::domain::{Inbox, Notification};
use agora_shared::Endpoint;
use agora_shared::dto::NotificationInfo;

use crate::error::UiResult;
use crate::render;
use crate::reply::Reply;

pub struct NotificationsPage {
    inbox: Inbox,
}

impl NotificationsPage {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self {
            inbox: Inbox::new(notifications),
        }
    }

    pub fn unread_count(&self) -> usize {
        self.inbox.unread_count()
    }

    pub fn list(&self) -> UiResult<Reply> {
        let items: Vec<NotificationInfo> =
            self.inbox.all().iter().map(NotificationInfo::from).collect();
        Ok(
            Reply::view(render::notifications(&items, self.unread_count()), &items)?
                .sent(Endpoint::NotificationsList, &[]),
        )
    }

    pub fn read(&mut self, notification_id: u64) -> UiResult<Reply> {
        self.inbox.mark_read(notification_id)?;
        Ok(Reply::done("Notification marked as read.")
            .with_text(format!("{} unread", self.unread_count()))
            .sent(Endpoint::NotificationRead, &[notification_id]))
    }

    pub fn read_all(&mut self) -> UiResult<Reply> {
        let changed = self.inbox.mark_all_read();
        tracing::debug!(changed, "Notifications marked as read");
        Ok(Reply::done("All notifications marked as read.")
            .sent(Endpoint::NotificationsReadAll, &[]))
    }
}
