//! Domain entities and the local collections that mutate them.

mod blind;
mod category;
mod comment;
mod likes;
mod log;
mod notification;
mod page;
mod post;
mod report;
mod settings;
mod stats;
mod target;
mod trash;
mod user;

pub use blind::{BlindList, BlindedItem};
pub use category::{Category, CategoryBoard, CategoryDraft, MoveDirection};
pub use comment::{Comment, CommentBoard, CommentThread};
pub use likes::Likes;
pub use log::{
    ActionType, ErrorLog, LogLevel, LogQuery, Severity, SystemLogEntry, UserActionLog,
};
pub use notification::{Inbox, Notification, NotificationKind};
pub use page::{Page, paginate};
pub use post::{
    Attachment, Author, FeedKind, POPULAR_LIKE_THRESHOLD, Post, PostBoard, PostDraft, PostQuery,
    PostSort, format_file_size,
};
pub use report::{Report, ReportQueue, ReportStatus};
pub use settings::{
    ContentSettings, GeneralSettings, LegalSettings, SecuritySettings, SettingsSection,
    SystemSettings,
};
pub use stats::{ActivityPoint, DashboardStats, HourlyActivity, StatsPeriod};
pub use target::{ContentKind, ContentRef};
pub use trash::{Trash, TrashedItem};
pub use user::{BanDuration, BanState, Role, User, UserFilter, UserRoster};
