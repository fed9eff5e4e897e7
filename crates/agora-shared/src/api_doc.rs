//! Catalog of the documented (not implemented) REST endpoints.
//!
//! Each UI action carries an [`ApiInfo`] describing the request a real
//! backend would receive. The console prints these on `api <endpoint>`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Value, json};

use crate::response::ResultCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        })
    }
}

/// One documented endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInfo {
    pub method: HttpMethod,
    pub endpoint: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub query_params: Vec<(&'static str, &'static str)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path_params: Vec<(&'static str, &'static str)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_example: Option<Value>,
}

impl ApiInfo {
    fn new(method: HttpMethod, endpoint: &'static str, description: &'static str) -> Self {
        Self {
            method,
            endpoint,
            description,
            query_params: Vec::new(),
            path_params: Vec::new(),
            request_body: None,
            response_example: None,
        }
    }

    fn query(mut self, params: &[(&'static str, &'static str)]) -> Self {
        self.query_params.extend_from_slice(params);
        self
    }

    fn path(mut self, name: &'static str, description: &'static str) -> Self {
        self.path_params.push((name, description));
        self
    }

    fn body(mut self, body: Value) -> Self {
        self.request_body = Some(body);
        self
    }

    /// Success envelope with a payload.
    fn responds(mut self, message: &str, data: Value) -> Self {
        self.response_example = Some(json!({
            "resultCode": ResultCode::Success,
            "resultMessage": message,
            "data": data,
        }));
        self
    }

    /// Success envelope without a payload.
    fn acknowledges(mut self, message: &str) -> Self {
        self.response_example = Some(json!({
            "resultCode": ResultCode::Success,
            "resultMessage": message,
        }));
        self
    }

    /// `METHOD /path` header line.
    pub fn signature(&self) -> String {
        format!("{} {}", self.method, self.endpoint)
    }

    /// The endpoint path with its path parameters filled in, in declaration
    /// order. Parameters without a value stay as placeholders.
    pub fn path_for<D: fmt::Display>(&self, values: &[D]) -> String {
        self.path_params
            .iter()
            .zip(values)
            .fold(self.endpoint.to_string(), |path, ((name, _), value)| {
                path.replace(&format!("{{{name}}}"), &value.to_string())
            })
    }
}

const PAGING: [(&str, &str); 2] = [
    ("page", "Page number (default: 1)"),
    ("size", "Page size (default: 20)"),
];

const LOG_PAGING: [(&str, &str); 4] = [
    ("page", "Page number (default: 1)"),
    ("size", "Page size (default: 50)"),
    ("start_date", "Start date (YYYY-MM-DD)"),
    ("end_date", "End date (YYYY-MM-DD)"),
];

macro_rules! endpoints {
    ($($variant:ident => $key:literal),+ $(,)?) => {
        /// Every documented endpoint, addressed by a dotted key such as
        /// `posts.list`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Endpoint {
            $($variant,)+
        }

        impl Endpoint {
            pub const ALL: &'static [Endpoint] = &[$(Endpoint::$variant,)+];

            pub fn key(&self) -> &'static str {
                match self {
                    $(Endpoint::$variant => $key,)+
                }
            }
        }

        impl FromStr for Endpoint {
            type Err = UnknownEndpoint;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($key => Ok(Endpoint::$variant),)+
                    other => Err(UnknownEndpoint(other.to_string())),
                }
            }
        }
    };
}

endpoints! {
    PostsList => "posts.list",
    PostsSearch => "posts.search",
    PostDetail => "posts.detail",
    PostCreate => "posts.create",
    PostUpdate => "posts.update",
    PostDelete => "posts.delete",
    PostLike => "posts.like",
    PostReport => "posts.report",
    CommentsList => "comments.list",
    CommentCreate => "comments.create",
    CommentUpdate => "comments.update",
    CommentDelete => "comments.delete",
    CommentLike => "comments.like",
    CommentReport => "comments.report",
    CategoriesList => "categories.list",
    CategoryCreate => "categories.create",
    CategoryUpdate => "categories.update",
    CategoryDelete => "categories.delete",
    CategoryReorder => "categories.reorder",
    FileUpload => "files.upload",
    FileDownload => "files.download",
    NotificationsList => "notifications.list",
    NotificationRead => "notifications.read",
    NotificationsReadAll => "notifications.read-all",
    UserInfo => "users.info",
    AdminUsersList => "users.list",
    UserBan => "users.ban",
    UserUnban => "users.unban",
    PostReportsList => "reports.posts",
    CommentReportsList => "reports.comments",
    ReportStatusUpdate => "reports.status",
    BlindedPostsList => "blind.posts",
    BlindedCommentsList => "blind.comments",
    PostBlind => "blind.post",
    CommentBlind => "blind.comment",
    PostUnblind => "unblind.post",
    CommentUnblind => "unblind.comment",
    TrashPostsList => "trash.posts",
    TrashCommentsList => "trash.comments",
    TrashPostRestore => "trash.restore-post",
    TrashCommentRestore => "trash.restore-comment",
    TrashPostPurge => "trash.purge-post",
    TrashCommentPurge => "trash.purge-comment",
    SystemLogs => "logs.system",
    UserActionLogs => "logs.user-actions",
    ErrorLogs => "logs.errors",
    DashboardStats => "stats.dashboard",
    SettingsGet => "settings.get",
    SettingsUpdate => "settings.update",
}

#[derive(Debug, thiserror::Error)]
#[error("unknown endpoint `{0}`")]
pub struct UnknownEndpoint(String);

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Endpoint {
    /// The catalog entry for this endpoint.
    pub fn info(&self) -> ApiInfo {
        use HttpMethod::*;

        match self {
            Endpoint::PostsList => ApiInfo::new(Get, "/posts", "List posts.")
                .query(&PAGING)
                .query(&[
                    ("category_id", "Category ID"),
                    ("sort", "Sort order (latest, popular, comments, views)"),
                ])
                .responds(
                    "Home feed loaded",
                    json!({
                        "notices": [{ "post_id": 1, "title": "Notice", "author": "admin", "created_at": "2024-11-01T10:00:00" }],
                        "pinned_posts": [{ "post_id": 2, "title": "Popular post", "author": "user01", "created_at": "2024-11-02T11:00:00" }],
                        "posts": [{ "post_id": 3, "title": "Regular post", "author": "user02", "created_at": "2024-11-03T12:00:00" }]
                    }),
                ),
            Endpoint::PostsSearch => ApiInfo::new(Get, "/search/posts", "Search posts.")
                .query(&[
                    ("category_id", "Board/category to search in"),
                    ("title", "Title keyword"),
                    ("author", "Author nickname keyword"),
                ])
                .responds(
                    "Post search succeeded",
                    json!([{
                        "post_id": 101,
                        "title": "Sharing load test results",
                        "author": "jay",
                        "created_at": "2024-10-20T09:00:00",
                        "view_count": 130,
                        "like_count": 8,
                        "comment_count": 3
                    }]),
                ),
            Endpoint::PostDetail => ApiInfo::new(Get, "/posts/{post_id}", "Fetch a post.")
                .path("post_id", "Post ID")
                .responds(
                    "Post loaded",
                    json!({
                        "post_id": 123,
                        "title": "Post title",
                        "content": "Post body",
                        "author": "Author",
                        "category": "Free Board",
                        "view_count": 42,
                        "like_count": 5,
                        "comment_count": 3,
                        "tags": ["tag1", "tag2"],
                        "is_notice": false,
                        "is_pinned": false,
                        "files": [],
                        "created_at": "2025-05-20T14:23:11"
                    }),
                ),
            Endpoint::PostCreate => ApiInfo::new(Post, "/posts", "Write a new post.")
                .body(json!({
                    "category": "Free Board",
                    "title": "Post title",
                    "content": "Post body (markdown)",
                    "is_notice": false,
                    "is_pinned": false,
                    "tags": ["tag1", "tag2"]
                }))
                .responds("Post created", json!({ "post_id": 123 })),
            Endpoint::PostUpdate => ApiInfo::new(Put, "/posts/{post_id}", "Edit a post.")
                .path("post_id", "Post ID")
                .body(json!({ "title": "Post title", "content": "Post body", "tags": ["tag1"] }))
                .acknowledges("Post updated"),
            Endpoint::PostDelete => ApiInfo::new(Delete, "/posts/{post_id}", "Delete a post.")
                .path("post_id", "Post ID")
                .acknowledges("Post deleted"),
            Endpoint::PostLike => ApiInfo::new(Post, "/posts/{post_id}/like", "Like a post.")
                .path("post_id", "Post ID")
                .acknowledges("Post liked"),
            Endpoint::PostReport => ApiInfo::new(Post, "/reports/posts/{post_id}", "Report a post.")
                .path("post_id", "Post ID")
                .body(json!({ "reason": "Report reason" }))
                .acknowledges("Post report submitted."),
            Endpoint::CommentsList => {
                ApiInfo::new(Get, "/posts/{post_id}/comments", "List the comments of a post.")
                    .path("post_id", "Post ID")
                    .query(&PAGING)
                    .responds(
                        "Comments loaded",
                        json!([{
                            "comment_id": 1,
                            "post_id": 1,
                            "parent_id": null,
                            "content": "Thanks for the write-up!",
                            "author": "user1",
                            "like_count": 3,
                            "is_secret": false,
                            "created_at": "2025-05-20T15:30:00"
                        }]),
                    )
            }
            Endpoint::CommentCreate => {
                ApiInfo::new(Post, "/posts/{post_id}/comments", "Write a comment or reply.")
                    .path("post_id", "Post ID")
                    .body(json!({ "content": "Comment text", "parent_id": null, "is_secret": false }))
                    .responds("Comment posted.", json!({ "comment_id": 4 }))
            }
            Endpoint::CommentUpdate => ApiInfo::new(Put, "/comments/{comment_id}", "Edit a comment.")
                .path("comment_id", "Comment ID")
                .body(json!({ "content": "Comment text" }))
                .acknowledges("Comment updated."),
            Endpoint::CommentDelete => {
                ApiInfo::new(Delete, "/comments/{comment_id}", "Delete a comment.")
                    .path("comment_id", "Comment ID")
                    .acknowledges("Comment deleted.")
            }
            Endpoint::CommentLike => {
                ApiInfo::new(Post, "/comments/{comment_id}/like", "Like a comment.")
                    .path("comment_id", "Comment ID")
                    .acknowledges("Comment liked")
            }
            Endpoint::CommentReport => {
                ApiInfo::new(Post, "/reports/comments/{comment_id}", "Report a comment.")
                    .path("comment_id", "Comment ID")
                    .body(json!({ "reason": "Report reason" }))
                    .acknowledges("Comment report submitted.")
            }
            Endpoint::CategoriesList => ApiInfo::new(Get, "/categories", "List board categories.")
                .responds(
                    "Categories loaded",
                    json!({
                        "categories": [
                            { "category_id": 1, "name": "Notice", "description": "Announcements from the administrators" },
                            { "category_id": 2, "name": "Free Board", "description": "Talk about anything" }
                        ]
                    }),
                ),
            Endpoint::CategoryCreate => {
                ApiInfo::new(Post, "/admin/categories", "Create a category.")
                    .body(json!({ "name": "Gallery", "description": "Share pictures", "is_visible": true }))
                    .responds("Category created", json!({ "category_id": 6 }))
            }
            Endpoint::CategoryUpdate => {
                ApiInfo::new(Put, "/admin/categories/{category_id}", "Edit a category.")
                    .path("category_id", "Category ID")
                    .body(json!({ "name": "Gallery", "description": "Share pictures", "is_visible": false }))
                    .acknowledges("Category updated")
            }
            Endpoint::CategoryDelete => {
                ApiInfo::new(Delete, "/admin/categories/{category_id}", "Delete an empty category.")
                    .path("category_id", "Category ID")
                    .acknowledges("Category deleted")
            }
            Endpoint::CategoryReorder => ApiInfo::new(
                Patch,
                "/admin/categories/{category_id}/order",
                "Move a category up or down.",
            )
            .path("category_id", "Category ID")
            .body(json!({ "direction": "up" }))
            .acknowledges("Category order changed"),
            Endpoint::FileUpload => ApiInfo::new(Post, "/files", "Upload a file.")
                .body(json!({
                    "file": "multipart/form-data file part",
                    "target_id": 101,
                    "target_type": "POST"
                }))
                .responds(
                    "File uploaded",
                    json!({
                        "file_id": 202,
                        "file_name": "document.pdf",
                        "file_path": "/uploads/202/document.pdf",
                        "file_type": "application/pdf",
                        "size": 1024000
                    }),
                ),
            Endpoint::FileDownload => {
                ApiInfo::new(Get, "/files/{file_id}/download", "Download an attachment.")
                    .path("file_id", "File ID")
            }
            Endpoint::NotificationsList => {
                ApiInfo::new(Get, "/notifications", "List the viewer's notifications.")
                    .query(&PAGING)
                    .responds(
                        "Notifications loaded",
                        json!([{
                            "notification_id": 1,
                            "type": "COMMENT",
                            "message": "user1 commented on your post.",
                            "is_read": false,
                            "created_at": "2025-05-20T14:30:00"
                        }]),
                    )
            }
            Endpoint::NotificationRead => ApiInfo::new(
                Patch,
                "/notifications/{notification_id}/read",
                "Mark one notification read.",
            )
            .path("notification_id", "Notification ID")
            .acknowledges("Notification marked read"),
            Endpoint::NotificationsReadAll => {
                ApiInfo::new(Patch, "/notifications/read-all", "Mark every notification read.")
                    .acknowledges("All notifications marked read")
            }
            Endpoint::UserInfo => {
                ApiInfo::new(Get, "/users/{user_id}/info", "Fetch a user's account information.")
                    .path("user_id", "User ID")
                    .responds(
                        "User info loaded",
                        json!({
                            "user_id": 123,
                            "username": "johndoe",
                            "nickname": "John",
                            "email": "johndoe@example.com",
                            "role": "USER",
                            "is_banned": false,
                            "ban_reason": null,
                            "banned_until": null,
                            "created_at": "2024-10-01T12:34:56"
                        }),
                    )
            }
            Endpoint::AdminUsersList => ApiInfo::new(Get, "/admin/users", "List users.")
                .query(&PAGING)
                .query(&[
                    ("role", "USER or ADMIN"),
                    ("is_banned", "Only banned users"),
                    ("search", "Username, nickname or email keyword"),
                ])
                .responds(
                    "Users loaded",
                    json!([{
                        "user_id": 1,
                        "username": "user1",
                        "nickname": "User One",
                        "email": "user1@example.com",
                        "role": "USER",
                        "is_banned": false,
                        "ban_reason": null,
                        "banned_until": null,
                        "created_at": "2025-01-15T10:30:00",
                        "post_count": 15,
                        "comment_count": 42
                    }]),
                ),
            Endpoint::UserBan => ApiInfo::new(Post, "/admin/users/{user_id}/ban", "Ban a user.")
                .path("user_id", "User ID")
                .body(json!({ "reason": "Ban reason", "duration_days": 7 }))
                .acknowledges("User banned"),
            Endpoint::UserUnban => {
                ApiInfo::new(Delete, "/admin/users/{user_id}/ban", "Lift a user's ban.")
                    .path("user_id", "User ID")
                    .acknowledges("User unbanned")
            }
            Endpoint::PostReportsList => {
                ApiInfo::new(Get, "/admin/reports/posts", "List post reports.")
                    .query(&PAGING)
                    .query(&[("status", "Status filter (PENDING, PROCESSED, REJECTED)")])
                    .responds(
                        "Post reports loaded",
                        json!([{
                            "report_id": 1,
                            "reason": "Contains abusive language.",
                            "reporter_id": 101,
                            "status": "PENDING",
                            "created_at": "2024-11-01T09:00:00"
                        }]),
                    )
            }
            Endpoint::CommentReportsList => {
                ApiInfo::new(Get, "/admin/reports/comments", "List comment reports.")
                    .query(&PAGING)
                    .query(&[("status", "Status filter (PENDING, PROCESSED, REJECTED)")])
                    .responds(
                        "Comment reports loaded",
                        json!([{
                            "report_id": 11,
                            "reason": "Contains profanity",
                            "reporter_id": 1002,
                            "status": "PENDING",
                            "created_at": "2024-11-02T15:30:00"
                        }]),
                    )
            }
            Endpoint::ReportStatusUpdate => ApiInfo::new(
                Patch,
                "/admin/reports/{report_id}/status",
                "Change a report's status.",
            )
            .path("report_id", "Report ID")
            .body(json!({ "status": "PROCESSED or REJECTED" }))
            .acknowledges("Report status changed"),
            Endpoint::BlindedPostsList => {
                ApiInfo::new(Get, "/admin/posts/blinded", "List blinded posts.")
                    .query(&PAGING)
                    .responds(
                        "Blinded posts loaded",
                        json!([{
                            "post_id": 123,
                            "title": "Blinded post",
                            "author_id": 101,
                            "blind_reason": "Contains abusive language",
                            "created_at": "2024-10-01T12:00:00"
                        }]),
                    )
            }
            Endpoint::BlindedCommentsList => {
                ApiInfo::new(Get, "/admin/comments/blinded", "List blinded comments.")
                    .query(&PAGING)
                    .responds(
                        "Blinded comments loaded",
                        json!([{
                            "comment_id": 555,
                            "content": "Comment with profanity",
                            "author_id": 1005,
                            "blind_reason": "Profanity",
                            "created_at": "2024-11-01T08:30:00"
                        }]),
                    )
            }
            Endpoint::PostBlind => {
                ApiInfo::new(Patch, "/admin/posts/{post_id}/blind", "Blind a post.")
                    .path("post_id", "Post ID")
                    .body(json!({ "reason": "Blind reason" }))
                    .acknowledges("Post blinded")
            }
            Endpoint::CommentBlind => {
                ApiInfo::new(Patch, "/admin/comments/{comment_id}/blind", "Blind a comment.")
                    .path("comment_id", "Comment ID")
                    .body(json!({ "reason": "Blind reason" }))
                    .acknowledges("Comment blinded")
            }
            Endpoint::PostUnblind => {
                ApiInfo::new(Patch, "/admin/posts/{post_id}/unblind", "Unblind a post.")
                    .path("post_id", "Post ID")
                    .acknowledges("Post unblinded")
            }
            Endpoint::CommentUnblind => {
                ApiInfo::new(Patch, "/admin/comments/{comment_id}/unblind", "Unblind a comment.")
                    .path("comment_id", "Comment ID")
                    .acknowledges("Comment unblinded")
            }
            Endpoint::TrashPostsList => {
                ApiInfo::new(Get, "/me/trash/posts", "List deleted posts.")
                    .query(&PAGING)
                    .responds(
                        "Deleted posts loaded",
                        json!([{
                            "post_id": 123,
                            "title": "A deleted post",
                            "created_at": "2024-10-01T12:00:00",
                            "deleted_at": "2024-11-01T08:00:00"
                        }]),
                    )
            }
            Endpoint::TrashCommentsList => {
                ApiInfo::new(Get, "/me/trash/comments", "List deleted comments.")
                    .query(&PAGING)
                    .responds(
                        "Deleted comments loaded",
                        json!([{
                            "comment_id": 456,
                            "content": "A deleted comment.",
                            "created_at": "2024-10-15T10:00:00",
                            "deleted_at": "2024-11-01T09:30:00"
                        }]),
                    )
            }
            Endpoint::TrashPostRestore => ApiInfo::new(
                Patch,
                "/me/trash/posts/{post_id}/restore",
                "Restore a deleted post.",
            )
            .path("post_id", "Post ID to restore")
            .acknowledges("Post restored"),
            Endpoint::TrashCommentRestore => ApiInfo::new(
                Patch,
                "/me/trash/comments/{comment_id}/restore",
                "Restore a deleted comment.",
            )
            .path("comment_id", "Comment ID to restore")
            .acknowledges("Comment restored"),
            Endpoint::TrashPostPurge => {
                ApiInfo::new(Delete, "/me/trash/posts/{post_id}", "Delete a post for good.")
                    .path("post_id", "Post ID to purge")
                    .acknowledges("Post permanently deleted")
            }
            Endpoint::TrashCommentPurge => ApiInfo::new(
                Delete,
                "/me/trash/comments/{comment_id}",
                "Delete a comment for good.",
            )
            .path("comment_id", "Comment ID to purge")
            .acknowledges("Comment permanently deleted"),
            Endpoint::SystemLogs => ApiInfo::new(Get, "/admin/logs", "Read the system log.")
                .query(&LOG_PAGING)
                .query(&[
                    ("level", "Log level (DEBUG, INFO, WARN, ERROR)"),
                    ("search", "Search term"),
                ])
                .responds(
                    "System logs loaded",
                    json!({
                        "logs": [{
                            "log_id": 1001,
                            "level": "INFO",
                            "message": "User logged in",
                            "timestamp": "2024-11-03T10:30:00",
                            "source": "auth.service",
                            "user_id": 123
                        }],
                        "total_count": 1500,
                        "current_page": 1,
                        "total_pages": 30
                    }),
                ),
            Endpoint::UserActionLogs => {
                ApiInfo::new(Get, "/admin/logs/user-actions", "Read the user action log.")
                    .query(&LOG_PAGING)
                    .query(&[
                        ("user_id", "Only this user"),
                        ("action_type", "Action type (LOGIN, LOGOUT, POST_CREATE, ...)"),
                    ])
                    .responds(
                        "User action logs loaded",
                        json!({
                            "logs": [{
                                "log_id": 2001,
                                "user_id": 123,
                                "username": "johndoe",
                                "action_type": "POST_CREATE",
                                "description": "Wrote a new post",
                                "ip_address": "192.168.1.100",
                                "timestamp": "2024-11-03T14:25:00"
                            }],
                            "total_count": 800,
                            "current_page": 1,
                            "total_pages": 16
                        }),
                    )
            }
            Endpoint::ErrorLogs => ApiInfo::new(Get, "/admin/logs/errors", "Read the error log.")
                .query(&LOG_PAGING)
                .query(&[
                    ("severity", "Severity (LOW, MEDIUM, HIGH, CRITICAL)"),
                    ("search", "Search term"),
                ])
                .responds(
                    "Error logs loaded",
                    json!({
                        "logs": [{
                            "log_id": 3001,
                            "severity": "HIGH",
                            "error_code": "DB_CONNECTION_FAILED",
                            "message": "Database connection failed",
                            "timestamp": "2024-11-03T09:15:00",
                            "resolved": false
                        }],
                        "total_count": 45,
                        "current_page": 1,
                        "total_pages": 1
                    }),
                ),
            Endpoint::DashboardStats => {
                ApiInfo::new(Get, "/admin/stats", "Dashboard counters and activity series.")
                    .query(&[("period", "day, week, month or year (default: week)")])
                    .responds(
                        "Dashboard stats loaded",
                        json!({
                            "total_users": 1234,
                            "active_users": 856,
                            "total_posts": 5678,
                            "total_comments": 12345,
                            "pending_reports": 23
                        }),
                    )
            }
            Endpoint::SettingsGet => ApiInfo::new(Get, "/admin/settings", "Read the system settings.")
                .responds(
                    "Settings loaded",
                    json!({
                        "general": { "site_title": "Agora Board", "allow_registration": true },
                        "content": { "max_file_size_mb": 10, "posts_per_page": 20 }
                    }),
                ),
            Endpoint::SettingsUpdate => {
                ApiInfo::new(Put, "/admin/settings/{section}", "Save one settings section.")
                    .path("section", "general, content, security or legal")
                    .body(json!({ "posts_per_page": 30 }))
                    .acknowledges("Settings saved")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_parse_back() {
        for endpoint in Endpoint::ALL {
            assert_eq!(endpoint.key().parse::<Endpoint>().unwrap(), *endpoint);
        }
        assert!("posts.archive".parse::<Endpoint>().is_err());
    }

    #[test]
    fn one_entry_per_method_and_path() {
        let signatures: HashSet<String> =
            Endpoint::ALL.iter().map(|e| e.info().signature()).collect();
        assert_eq!(signatures.len(), Endpoint::ALL.len());
    }

    #[test]
    fn path_params_appear_in_the_path() {
        for endpoint in Endpoint::ALL {
            let info = endpoint.info();
            for (name, _) in &info.path_params {
                assert!(
                    info.endpoint.contains(&format!("{{{name}}}")),
                    "{} lacks {{{name}}}",
                    info.signature()
                );
            }
        }
    }

    #[test]
    fn path_values_fill_placeholders() {
        let info = Endpoint::UserBan.info();
        assert_eq!(info.path_for(&[4]), "/admin/users/4/ban");
        assert_eq!(info.path_for::<u64>(&[]), "/admin/users/{user_id}/ban");
    }

    #[test]
    fn examples_use_the_envelope() {
        let info = Endpoint::UserInfo.info();
        let example = info.response_example.unwrap();
        assert_eq!(example["resultCode"], "200000");
        assert_eq!(example["data"]["user_id"], 123);

        let json = serde_json::to_value(Endpoint::PostLike.info()).unwrap();
        assert_eq!(json["method"], "POST");
        assert!(json.get("queryParams").is_none());
        assert_eq!(json["pathParams"][0][0], "post_id");
    }
}
