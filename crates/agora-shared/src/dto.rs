//! Data Transfer Objects - the snake_case payloads of the documented API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use agora_core::domain::{
    ActionType, Attachment, BanDuration, BlindedItem, Category, Comment, ContentKind, ErrorLog,
    LogLevel, Notification, NotificationKind, Page, Post, PostDraft, Report, ReportStatus, Role,
    Severity, SystemLogEntry, TrashedItem, User, UserActionLog,
};

/// Row of the post listing and of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub post_id: u64,
    pub title: String,
    pub author: String,
    pub created_at: NaiveDateTime,
    pub view_count: u32,
    pub like_count: u32,
    pub comment_count: u32,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            post_id: post.id,
            title: post.title.clone(),
            author: post.author.name.clone(),
            created_at: post.created_at,
            view_count: post.view_count,
            like_count: post.likes.count,
            comment_count: post.comment_count,
        }
    }
}

/// `GET /posts` payload: the home screen splits notices and pinned posts from
/// the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeFeed {
    pub notices: Vec<PostSummary>,
    pub pinned_posts: Vec<PostSummary>,
    pub posts: Vec<PostSummary>,
}

impl<'a> FromIterator<&'a Post> for HomeFeed {
    fn from_iter<I: IntoIterator<Item = &'a Post>>(iter: I) -> Self {
        let mut feed = HomeFeed::default();
        for post in iter {
            let bucket = if post.is_notice {
                &mut feed.notices
            } else if post.is_pinned {
                &mut feed.pinned_posts
            } else {
                &mut feed.posts
            };
            bucket.push(PostSummary::from(post));
        }
        feed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub file_id: u64,
    pub file_name: String,
    pub size: String,
}

impl From<&Attachment> for FileInfo {
    fn from(file: &Attachment) -> Self {
        Self {
            file_id: file.id,
            file_name: file.name.clone(),
            size: file.size.clone(),
        }
    }
}

/// `GET /posts/{post_id}` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetail {
    pub post_id: u64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub category: String,
    pub view_count: u32,
    pub like_count: u32,
    pub comment_count: u32,
    pub tags: Vec<String>,
    pub is_notice: bool,
    pub is_pinned: bool,
    pub files: Vec<FileInfo>,
    pub created_at: NaiveDateTime,
}

impl From<&Post> for PostDetail {
    fn from(post: &Post) -> Self {
        Self {
            post_id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            author: post.author.name.clone(),
            category: post.category.clone(),
            view_count: post.view_count,
            like_count: post.likes.count,
            comment_count: post.comment_count,
            tags: post.tags.clone(),
            is_notice: post.is_notice,
            is_pinned: post.is_pinned,
            files: post.files.iter().map(FileInfo::from).collect(),
            created_at: post.created_at,
        }
    }
}

/// `POST /posts` body, as the editor would send it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub category: String,
    pub title: String,
    pub content: String,
    pub is_notice: bool,
    pub is_pinned: bool,
    pub tags: Vec<String>,
}

impl From<&PostDraft> for CreatePostRequest {
    fn from(draft: &PostDraft) -> Self {
        Self {
            category: draft.category.trim().to_string(),
            title: draft.title.trim().to_string(),
            content: draft.content.trim().to_string(),
            is_notice: draft.is_notice,
            is_pinned: draft.is_pinned,
            tags: draft.tags().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPost {
    pub post_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentInfo {
    pub comment_id: u64,
    pub post_id: u64,
    pub parent_id: Option<u64>,
    pub content: String,
    pub author: String,
    pub like_count: u32,
    pub is_secret: bool,
    pub created_at: NaiveDateTime,
}

impl From<&Comment> for CommentInfo {
    fn from(comment: &Comment) -> Self {
        Self {
            comment_id: comment.id,
            post_id: comment.post_id,
            parent_id: comment.parent_id,
            content: comment.content.clone(),
            author: comment.author.name.clone(),
            like_count: comment.likes.count,
            is_secret: comment.is_secret,
            created_at: comment.created_at,
        }
    }
}

/// Body of `POST /posts/{post_id}/comments`. Replies carry the id of the
/// comment they answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    pub parent_id: Option<u64>,
    pub is_secret: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedComment {
    pub comment_id: u64,
}

/// Body of the post/comment report endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportInfo {
    pub report_id: u64,
    pub target_type: ContentKind,
    pub target_id: u64,
    pub target_title: String,
    pub reason: String,
    pub reporter_id: u64,
    pub status: ReportStatus,
    pub created_at: NaiveDateTime,
}

impl From<&Report> for ReportInfo {
    fn from(report: &Report) -> Self {
        Self {
            report_id: report.id,
            target_type: report.target.kind,
            target_id: report.target.id,
            target_title: report.target_title.clone(),
            reason: report.reason.clone(),
            reporter_id: report.reporter_id,
            status: report.status,
            created_at: report.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStatusRequest {
    pub status: ReportStatus,
}

/// Blinded rows: posts carry their title, comments their content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlindedInfo {
    Post {
        post_id: u64,
        title: String,
        author_id: u64,
        blind_reason: String,
        created_at: NaiveDateTime,
    },
    Comment {
        comment_id: u64,
        content: String,
        author_id: u64,
        blind_reason: String,
        created_at: NaiveDateTime,
    },
}

impl From<&BlindedItem> for BlindedInfo {
    fn from(item: &BlindedItem) -> Self {
        match item.target.kind {
            ContentKind::Post => BlindedInfo::Post {
                post_id: item.target.id,
                title: item.snippet.clone(),
                author_id: item.author_id,
                blind_reason: item.reason.clone(),
                created_at: item.created_at,
            },
            ContentKind::Comment => BlindedInfo::Comment {
                comment_id: item.target.id,
                content: item.snippet.clone(),
                author_id: item.author_id,
                blind_reason: item.reason.clone(),
                created_at: item.created_at,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindRequest {
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrashedInfo {
    Post {
        post_id: u64,
        title: String,
        created_at: NaiveDateTime,
        deleted_at: NaiveDateTime,
    },
    Comment {
        comment_id: u64,
        content: String,
        created_at: NaiveDateTime,
        deleted_at: NaiveDateTime,
    },
}

impl From<&TrashedItem> for TrashedInfo {
    fn from(item: &TrashedItem) -> Self {
        match item.target.kind {
            ContentKind::Post => TrashedInfo::Post {
                post_id: item.target.id,
                title: item.title.clone(),
                created_at: item.created_at,
                deleted_at: item.deleted_at,
            },
            ContentKind::Comment => TrashedInfo::Comment {
                comment_id: item.target.id,
                content: item.title.clone(),
                created_at: item.created_at,
                deleted_at: item.deleted_at,
            },
        }
    }
}

/// `GET /users/{user_id}/info` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: u64,
    pub username: String,
    pub nickname: String,
    pub email: String,
    pub role: Role,
    pub is_banned: bool,
    pub ban_reason: Option<String>,
    pub banned_until: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            nickname: user.nickname.clone(),
            email: user.email.clone(),
            role: user.role,
            is_banned: user.is_banned(),
            ban_reason: user.ban.as_ref().map(|b| b.reason.clone()),
            banned_until: user.ban.as_ref().and_then(|b| b.until),
            created_at: user.created_at,
        }
    }
}

/// Row of the admin user table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUserInfo {
    #[serde(flatten)]
    pub user: UserInfo,
    pub post_count: u32,
    pub comment_count: u32,
}

impl From<&User> for AdminUserInfo {
    fn from(user: &User) -> Self {
        Self {
            user: UserInfo::from(user),
            post_count: user.post_count,
            comment_count: user.comment_count,
        }
    }
}

/// Ban dialog body. No `duration_days` means permanent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanRequest {
    pub reason: String,
    pub duration_days: Option<u32>,
}

impl BanRequest {
    pub fn new(reason: impl Into<String>, duration: BanDuration) -> Self {
        Self {
            reason: reason.into(),
            duration_days: match duration {
                BanDuration::Days(days) => Some(days),
                BanDuration::Permanent => None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub category_id: u64,
    pub name: String,
    pub description: String,
    pub post_count: u32,
    pub is_visible: bool,
    pub order: u32,
}

impl From<&Category> for CategoryInfo {
    fn from(category: &Category) -> Self {
        Self {
            category_id: category.id,
            name: category.name.clone(),
            description: category.description.clone(),
            post_count: category.post_count,
            is_visible: category.is_visible,
            order: category.order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationInfo {
    pub notification_id: u64,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

impl From<&Notification> for NotificationInfo {
    fn from(n: &Notification) -> Self {
        Self {
            notification_id: n.id,
            kind: n.kind,
            message: n.message.clone(),
            is_read: n.is_read,
            created_at: n.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemLogInfo {
    pub log_id: u64,
    pub level: LogLevel,
    pub message: String,
    pub timestamp: NaiveDateTime,
    pub source: String,
    pub user_id: Option<u64>,
}

impl From<&SystemLogEntry> for SystemLogInfo {
    fn from(entry: &SystemLogEntry) -> Self {
        Self {
            log_id: entry.id,
            level: entry.level,
            message: entry.message.clone(),
            timestamp: entry.timestamp,
            source: entry.source.clone(),
            user_id: entry.user_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActionLogInfo {
    pub log_id: u64,
    pub user_id: u64,
    pub username: String,
    pub action_type: ActionType,
    pub description: String,
    pub ip_address: String,
    pub timestamp: NaiveDateTime,
}

impl From<&UserActionLog> for UserActionLogInfo {
    fn from(entry: &UserActionLog) -> Self {
        Self {
            log_id: entry.id,
            user_id: entry.user_id,
            username: entry.username.clone(),
            action_type: entry.action_type,
            description: entry.description.clone(),
            ip_address: entry.ip_address.clone(),
            timestamp: entry.timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLogInfo {
    pub log_id: u64,
    pub severity: Severity,
    pub error_code: String,
    pub message: String,
    pub timestamp: NaiveDateTime,
    pub resolved: bool,
}

impl From<&ErrorLog> for ErrorLogInfo {
    fn from(entry: &ErrorLog) -> Self {
        Self {
            log_id: entry.id,
            severity: entry.severity,
            error_code: entry.error_code.clone(),
            message: entry.message.clone(),
            timestamp: entry.timestamp,
            resolved: entry.resolved,
        }
    }
}

/// Paged payload of the log endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogPage<T> {
    pub logs: Vec<T>,
    pub total_count: usize,
    pub current_page: usize,
    pub total_pages: usize,
}

impl<T> From<Page<T>> for LogPage<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            logs: page.items,
            total_count: page.total_count,
            current_page: page.current_page,
            total_pages: page.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::domain::{Author, BanState, ContentRef, Likes, paginate};
    use chrono::NaiveDate;
    use serde_json::json;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, day)
            .unwrap()
            .and_hms_opt(14, 23, 11)
            .unwrap()
    }

    fn post(id: u64, notice: bool, pinned: bool) -> Post {
        Post {
            id,
            title: format!("post {id}"),
            content: "body".to_string(),
            author: Author::new(7, "admin"),
            category: "Notice".to_string(),
            created_at: at(20),
            view_count: 42,
            likes: Likes::new(5, true),
            comment_count: 3,
            is_notice: notice,
            is_pinned: pinned,
            tags: vec!["rust".to_string()],
            files: Vec::new(),
        }
    }

    #[test]
    fn post_detail_uses_documented_field_names() {
        let value = serde_json::to_value(PostDetail::from(&post(123, false, false))).unwrap();
        assert_eq!(value["post_id"], 123);
        assert_eq!(value["like_count"], 5);
        assert_eq!(value["created_at"], "2025-05-20T14:23:11");
        assert!(value.get("liked").is_none());
    }

    #[test]
    fn home_feed_splits_notices_and_pinned() {
        let posts = [post(1, true, true), post(2, false, true), post(3, false, false)];
        let feed: HomeFeed = posts.iter().collect();
        assert_eq!(feed.notices[0].post_id, 1);
        assert_eq!(feed.pinned_posts[0].post_id, 2);
        assert_eq!(feed.posts[0].post_id, 3);
    }

    #[test]
    fn user_info_flattens_ban_state() {
        let user = User {
            id: 4,
            username: "baduser".to_string(),
            nickname: "Bad".to_string(),
            email: "bad@example.com".to_string(),
            role: Role::User,
            ban: Some(BanState {
                reason: "Spam".to_string(),
                until: None,
            }),
            created_at: at(1),
            post_count: 2,
            comment_count: 9,
        };
        let value = serde_json::to_value(AdminUserInfo::from(&user)).unwrap();
        assert_eq!(value["user_id"], 4);
        assert_eq!(value["role"], "USER");
        assert_eq!(value["is_banned"], true);
        assert_eq!(value["ban_reason"], "Spam");
        assert_eq!(value["banned_until"], serde_json::Value::Null);
        assert_eq!(value["comment_count"], 9);
    }

    #[test]
    fn blinded_rows_depend_on_kind() {
        let item = BlindedItem {
            target: ContentRef::comment(555),
            snippet: "rude".to_string(),
            author_id: 1005,
            reason: "Profanity".to_string(),
            created_at: at(1),
        };
        assert_eq!(
            serde_json::to_value(BlindedInfo::from(&item)).unwrap(),
            json!({
                "comment_id": 555,
                "content": "rude",
                "author_id": 1005,
                "blind_reason": "Profanity",
                "created_at": "2025-05-01T14:23:11"
            })
        );
    }

    #[test]
    fn ban_request_encodes_permanent_as_missing_days() {
        assert_eq!(BanRequest::new("x", BanDuration::Permanent).duration_days, None);
        assert_eq!(BanRequest::new("x", BanDuration::default()).duration_days, Some(7));
    }

    #[test]
    fn log_page_carries_counters() {
        let page = paginate((1..=120u64).collect(), 2, 50).unwrap();
        let logs = LogPage::from(page);
        assert_eq!(logs.logs.len(), 50);
        assert_eq!((logs.total_count, logs.current_page, logs.total_pages), (120, 2, 3));
    }
}
