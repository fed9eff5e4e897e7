//! Plain-text views of the board pages.

use chrono::NaiveDateTime;

use agora_core::domain::{DashboardStats, Page, SettingsSection, SystemSettings};
use agora_core::ports::Toast;
use agora_shared::ApiInfo;
use agora_shared::dto::{
    AdminUserInfo, BlindedInfo, CategoryInfo, CommentInfo, CreatePostRequest, ErrorLogInfo,
    FileInfo, HomeFeed, LogPage, NotificationInfo, PostDetail, PostSummary, ReportInfo,
    SystemLogInfo, TrashedInfo, UserActionLogInfo, UserInfo,
};

fn when(at: &NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

fn flag(on: bool) -> &'static str {
    if on { "yes" } else { "no" }
}

fn post_row(post: &PostSummary) -> String {
    format!(
        "{:>5}  {:<40}  {:<14}  {}  views {:>4}  likes {:>3}  comments {:>3}",
        post.post_id,
        clip(&post.title, 40),
        clip(&post.author, 14),
        when(&post.created_at),
        post.view_count,
        post.like_count,
        post.comment_count
    )
}

pub fn post_page(page: &Page<PostSummary>, pinned: &[u64]) -> String {
    if page.items.is_empty() {
        return "No posts.".to_string();
    }
    let mut lines: Vec<String> = page
        .items
        .iter()
        .map(|post| {
            let marker = if pinned.contains(&post.post_id) { "*" } else { " " };
            format!("{marker}{}", post_row(post))
        })
        .collect();
    lines.push(format!(
        "page {}/{} ({} posts)",
        page.current_page,
        page.total_pages.max(1),
        page.total_count
    ));
    lines.join("\n")
}

pub fn home(feed: &HomeFeed) -> String {
    let section = |title: &str, posts: &[PostSummary]| {
        let mut lines = vec![format!("== {title} ==")];
        if posts.is_empty() {
            lines.push("  (none)".to_string());
        }
        lines.extend(posts.iter().map(post_row));
        lines.join("\n")
    };
    [
        section("Notices", &feed.notices),
        section("Pinned", &feed.pinned_posts),
        section("Posts", &feed.posts),
    ]
    .join("\n")
}

fn files(files: &[FileInfo]) -> Vec<String> {
    files
        .iter()
        .map(|f| format!("  [{}] {} ({})", f.file_id, f.file_name, f.size))
        .collect()
}

/// A comment row as shown in the thread view. `hidden` comments keep their
/// place but not their text.
pub struct CommentLine<'a> {
    pub info: &'a CommentInfo,
    pub liked: bool,
    pub hidden: bool,
}

fn comment_line(line: &CommentLine<'_>, indent: &str) -> String {
    let info = line.info;
    let content = if line.hidden {
        "(blinded by a moderator)".to_string()
    } else {
        info.content.clone()
    };
    format!(
        "{indent}#{} {}{} · {} · {} {}\n{indent}  {}",
        info.comment_id,
        info.author,
        if info.is_secret { " [secret]" } else { "" },
        when(&info.created_at),
        if line.liked { "♥" } else { "♡" },
        info.like_count,
        content
    )
}

pub fn comment_threads(threads: &[(CommentLine<'_>, Vec<CommentLine<'_>>)]) -> String {
    if threads.is_empty() {
        return "No comments yet.".to_string();
    }
    threads
        .iter()
        .map(|(root, replies)| {
            let mut lines = vec![comment_line(root, "")];
            lines.extend(replies.iter().map(|reply| comment_line(reply, "    ↳ ")));
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn post_detail(post: &PostDetail, liked: bool, comments: &str) -> String {
    let mut lines = vec![
        format!(
            "#{} [{}] {}{}{}",
            post.post_id,
            post.category,
            post.title,
            if post.is_notice { "  [notice]" } else { "" },
            if post.is_pinned { "  [pinned]" } else { "" },
        ),
        format!(
            "by {} · {} · views {} · {} {} · comments {}",
            post.author,
            when(&post.created_at),
            post.view_count,
            if liked { "♥" } else { "♡" },
            post.like_count,
            post.comment_count
        ),
    ];
    if !post.tags.is_empty() {
        lines.push(format!(
            "tags: {}",
            post.tags
                .iter()
                .map(|t| format!("#{t}"))
                .collect::<Vec<_>>()
                .join(" ")
        ));
    }
    lines.push(String::new());
    lines.push(post.content.clone());
    if !post.files.is_empty() {
        lines.push(String::new());
        lines.push("Attachments:".to_string());
        lines.extend(files(&post.files));
    }
    lines.push(String::new());
    lines.push(format!("-- Comments ({}) --", post.comment_count));
    lines.push(comments.to_string());
    lines.join("\n")
}

pub fn draft(request: &CreatePostRequest, attachments: &[FileInfo]) -> String {
    let field = |value: &str| {
        if value.trim().is_empty() {
            "(empty)".to_string()
        } else {
            value.to_string()
        }
    };
    let mut lines = vec![
        format!("category: {}", field(&request.category)),
        format!("title:    {}", field(&request.title)),
        format!("content:  {}", field(&request.content)),
        format!(
            "notice: {}  pinned: {}",
            flag(request.is_notice),
            flag(request.is_pinned)
        ),
        format!("tags:     {}", request.tags.join(", ")),
    ];
    if !attachments.is_empty() {
        lines.push("files:".to_string());
        lines.extend(files(attachments));
    }
    lines.join("\n")
}

pub fn reports(reports: &[ReportInfo]) -> String {
    if reports.is_empty() {
        return "No reports.".to_string();
    }
    reports
        .iter()
        .map(|r| {
            format!(
                "{:>4}  {:<9}  {} #{:<4}  {:<30}  by user {:<5}  {}  {}",
                r.report_id,
                r.status.as_str(),
                r.target_type,
                r.target_id,
                clip(&r.target_title, 30),
                r.reporter_id,
                when(&r.created_at),
                r.reason
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn blinded(items: &[BlindedInfo]) -> String {
    if items.is_empty() {
        return "Nothing is blinded.".to_string();
    }
    items
        .iter()
        .map(|item| match item {
            BlindedInfo::Post {
                post_id,
                title,
                author_id,
                blind_reason,
                created_at,
            } => format!(
                "post #{post_id:<5} {:<36}  author {author_id:<5}  {}  {blind_reason}",
                clip(title, 36),
                when(created_at)
            ),
            BlindedInfo::Comment {
                comment_id,
                content,
                author_id,
                blind_reason,
                created_at,
            } => format!(
                "comment #{comment_id:<5} {:<33}  author {author_id:<5}  {}  {blind_reason}",
                clip(content, 33),
                when(created_at)
            ),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn ban_label(user: &UserInfo) -> String {
    match (user.is_banned, user.banned_until) {
        (false, _) => "active".to_string(),
        (true, Some(until)) => format!("banned until {}", when(&until)),
        (true, None) => "banned permanently".to_string(),
    }
}

pub fn users(users: &[AdminUserInfo]) -> String {
    if users.is_empty() {
        return "No users match.".to_string();
    }
    users
        .iter()
        .map(|row| {
            let user = &row.user;
            format!(
                "{:>5}  {:<12}  {:<14}  {:<26}  {:<5}  posts {:>3}  comments {:>3}  {}",
                user.user_id,
                clip(&user.username, 12),
                clip(&user.nickname, 14),
                clip(&user.email, 26),
                user.role.as_str(),
                row.post_count,
                row.comment_count,
                ban_label(user)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn profile(user: &UserInfo) -> String {
    [
        format!("{} ({})", user.nickname, user.username),
        format!("id:      {}", user.user_id),
        format!("email:   {}", user.email),
        format!("role:    {}", user.role),
        format!("joined:  {}", when(&user.created_at)),
        format!("status:  {}", ban_label(user)),
    ]
    .join("\n")
}

pub fn categories(categories: &[CategoryInfo]) -> String {
    if categories.is_empty() {
        return "No categories.".to_string();
    }
    categories
        .iter()
        .map(|c| {
            format!(
                "{:>2}. [{}] {:<16}  posts {:>3}  {:<7}  {}",
                c.order,
                c.category_id,
                c.name,
                c.post_count,
                if c.is_visible { "visible" } else { "hidden" },
                c.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn notifications(items: &[NotificationInfo], unread: usize) -> String {
    let mut lines = vec![format!("{unread} unread")];
    lines.extend(items.iter().map(|n| {
        format!(
            "{} {:>4}  {:<7}  {}  {}",
            if n.is_read { " " } else { "•" },
            n.notification_id,
            n.kind.to_string(),
            when(&n.created_at),
            n.message
        )
    }));
    lines.join("\n")
}

pub fn trash(items: &[TrashedInfo]) -> String {
    if items.is_empty() {
        return "The trash is empty.".to_string();
    }
    items
        .iter()
        .map(|item| match item {
            TrashedInfo::Post {
                post_id,
                title,
                deleted_at,
                ..
            } => format!(
                "post #{post_id:<5} {:<40}  deleted {}",
                clip(title, 40),
                when(deleted_at)
            ),
            TrashedInfo::Comment {
                comment_id,
                content,
                deleted_at,
                ..
            } => format!(
                "comment #{comment_id:<5} {:<37}  deleted {}",
                clip(content, 37),
                when(deleted_at)
            ),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn stats(stats: &DashboardStats) -> String {
    let mut lines = vec![
        format!(
            "users     {:>6}  ({})   active {} ({}%)",
            stats.total_users,
            stats.users_trend,
            stats.active_users,
            stats.active_ratio()
        ),
        format!("posts     {:>6}  ({})", stats.total_posts, stats.posts_trend),
        format!(
            "comments  {:>6}  ({})",
            stats.total_comments, stats.comments_trend
        ),
        format!(
            "reports   {:>6}  pending ({})",
            stats.pending_reports, stats.reports_trend
        ),
        format!(
            "today     views {}  likes {}  new users {}",
            stats.views_today, stats.likes_today, stats.new_users_today
        ),
        String::new(),
        "activity:".to_string(),
    ];
    lines.extend(stats.activity.iter().map(|p| {
        format!(
            "  {:<6} posts {:>4}  comments {:>4}  views {:>6}",
            p.label, p.posts, p.comments, p.views
        )
    }));
    if let Some(peak) = stats.peak_day() {
        lines.push(format!("  peak: {} ({} views)", peak.label, peak.views));
    }
    lines.push("active users by hour:".to_string());
    lines.extend(
        stats
            .hourly_users
            .iter()
            .map(|h| format!("  {:<6} {:>5}", h.label, h.users)),
    );
    lines.join("\n")
}

pub fn settings(settings: &SystemSettings, dirty: &[SettingsSection]) -> String {
    let mark = |section: SettingsSection| {
        if dirty.contains(&section) {
            format!("[{section}] (unsaved)")
        } else {
            format!("[{section}]")
        }
    };
    let general = &settings.general;
    let content = &settings.content;
    let security = &settings.security;
    let legal = &settings.legal;
    [
        mark(SettingsSection::General),
        format!("  site_title = {}", general.site_title),
        format!("  site_description = {}", general.site_description),
        format!("  allow_registration = {}", general.allow_registration),
        format!(
            "  require_email_verification = {}",
            general.require_email_verification
        ),
        mark(SettingsSection::Content),
        format!("  allow_file_upload = {}", content.allow_file_upload),
        format!("  max_file_size = {}MB", content.max_file_size_mb),
        format!(
            "  allowed_file_types = {}",
            content.allowed_file_types.join(",")
        ),
        format!("  posts_per_page = {}", content.posts_per_page),
        format!("  comments_per_page = {}", content.comments_per_page),
        mark(SettingsSection::Security),
        format!("  enable_reporting = {}", security.enable_reporting),
        format!("  auto_blind_threshold = {}", security.auto_blind_threshold),
        format!("  maintenance_mode = {}", security.maintenance_mode),
        format!("  maintenance_message = {}", security.maintenance_message),
        mark(SettingsSection::Legal),
        format!("  footer_text = {}", legal.footer_text),
        format!("  terms_of_service = {}", clip(&legal.terms_of_service, 60)),
        format!("  privacy_policy = {}", clip(&legal.privacy_policy, 60)),
    ]
    .join("\n")
}

fn log_footer<T>(page: &LogPage<T>) -> String {
    format!(
        "page {}/{} ({} entries)",
        page.current_page,
        page.total_pages.max(1),
        page.total_count
    )
}

pub fn system_logs(page: &LogPage<SystemLogInfo>) -> String {
    let mut lines: Vec<String> = page
        .logs
        .iter()
        .map(|log| {
            format!(
                "{}  {:<5}  {:<22}  {}{}",
                when(&log.timestamp),
                log.level.as_str(),
                clip(&log.source, 22),
                log.message,
                log.user_id
                    .map(|id| format!("  (user {id})"))
                    .unwrap_or_default()
            )
        })
        .collect();
    lines.push(log_footer(page));
    lines.join("\n")
}

pub fn action_logs(page: &LogPage<UserActionLogInfo>) -> String {
    let mut lines: Vec<String> = page
        .logs
        .iter()
        .map(|log| {
            format!(
                "{}  {:<14}  {:<12}  {:<15}  {}",
                when(&log.timestamp),
                log.action_type.as_str(),
                clip(&log.username, 12),
                log.ip_address,
                log.description
            )
        })
        .collect();
    lines.push(log_footer(page));
    lines.join("\n")
}

pub fn error_logs(page: &LogPage<ErrorLogInfo>) -> String {
    let mut lines: Vec<String> = page
        .logs
        .iter()
        .map(|log| {
            format!(
                "{}  {:<8}  {:<20}  {:<8}  {}",
                when(&log.timestamp),
                log.severity.as_str(),
                log.error_code,
                if log.resolved { "resolved" } else { "open" },
                log.message
            )
        })
        .collect();
    lines.push(log_footer(page));
    lines.join("\n")
}

/// One toast per line, oldest first.
pub fn toasts(toasts: &[Toast]) -> String {
    if toasts.is_empty() {
        return "No toasts yet.".to_string();
    }
    toasts
        .iter()
        .map(|toast| {
            let mark = if toast.is_destructive() { "[!]" } else { "[ok]" };
            format!("{mark} {}", toast.description)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn api_info(info: &ApiInfo) -> String {
    let mut lines = vec![info.signature(), format!("  {}", info.description)];
    let params = |title: &str, params: &[(&str, &str)]| {
        let mut lines = Vec::new();
        if !params.is_empty() {
            lines.push(format!("  {title}:"));
            lines.extend(
                params
                    .iter()
                    .map(|(name, description)| format!("    {name:<12} {description}")),
            );
        }
        lines
    };
    lines.extend(params("path", info.path_params.as_slice()));
    lines.extend(params("query", info.query_params.as_slice()));
    if let Some(body) = &info.request_body {
        lines.push(format!("  body: {body}"));
    }
    if let Some(example) = &info.response_example {
        lines.push(format!("  response: {example}"));
    }
    lines.join("\n")
}
