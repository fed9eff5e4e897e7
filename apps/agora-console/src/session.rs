//! One console session: every page mounted from the fixtures, plus the rules
//! that span pages (reports feeding the moderation queue, deletes feeding the
//! trash, category post counters).

use chrono::NaiveDateTime;

use agora_core::DomainError;
use agora_core::domain::{
    Author, CommentBoard, ContentKind, ContentRef, LogQuery, User,
};
use agora_shared::Endpoint;

use crate::commands::{
    AdminCommand, BlindCommand, CategoriesCommand, CategoryEdit, Command, CommentCommand, LogsCommand,
    NotificationCommand, PostCommand, ReportsCommand, SettingsCommand, TrashCommand,
    UsersCommand, WriteCommand,
};
use crate::config::ConsoleConfig;
use crate::error::UiResult;
use crate::pages::admin::{
    self, BlindPage, CategoriesPage, LogsPage, ReportsPage, SettingsPage, UsersPage,
};
use crate::pages::{
    CommentsPage, EditorPage, NotificationsPage, PostsPage, ProfilePage, Stash, TrashPage,
};
use crate::render;
use crate::reply::Reply;
use crate::state::AppState;

struct Pages {
    posts: PostsPage,
    comments: CommentsPage,
    editor: EditorPage,
    notifications: NotificationsPage,
    profile: ProfilePage,
    trash: TrashPage,
    reports: ReportsPage,
    blind: BlindPage,
    users: UsersPage,
    categories: CategoriesPage,
    settings: SettingsPage,
    logs: LogsPage,
}

impl Pages {
    async fn mount(state: &AppState, config: &ConsoleConfig) -> UiResult<Self> {
        let fixtures = state.fixtures.as_ref();

        let posts = fixtures.posts().await?;
        let mut sections = Vec::with_capacity(posts.len());
        for post in &posts {
            sections.push(CommentBoard::new(post.id, fixtures.comments(post.id).await?));
        }

        let trash = TrashPage::new(fixtures.trash().await?);
        let mut posts = PostsPage::new(posts, config.page_size);
        posts.board_mut().reserve_ids(trash.max_post_id());

        let pages = Self {
            posts,
            comments: CommentsPage::new(sections),
            editor: EditorPage::default(),
            notifications: NotificationsPage::new(fixtures.notifications().await?),
            profile: ProfilePage::new(config.profile_user_id.clone()),
            trash,
            reports: ReportsPage::new(fixtures.reports().await?),
            blind: BlindPage::new(fixtures.blinded().await?),
            users: UsersPage::new(fixtures.users().await?),
            categories: CategoriesPage::new(fixtures.categories().await?),
            settings: SettingsPage::new(fixtures.settings().await?),
            logs: LogsPage::new(
                fixtures.system_logs().await?,
                fixtures.user_action_logs().await?,
                fixtures.error_logs().await?,
            ),
        };
        tracing::info!(
            posts = pages.posts.board().len(),
            users = pages.users.roster().len(),
            trash = pages.trash.len(),
            "Pages mounted"
        );
        Ok(pages)
    }
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

pub struct Session {
    state: AppState,
    config: ConsoleConfig,
    pages: Pages,
}

impl Session {
    pub async fn mount(state: AppState, config: ConsoleConfig) -> UiResult<Self> {
        let pages = Pages::mount(&state, &config).await?;
        Ok(Self {
            state,
            config,
            pages,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Throw away every change and mount the pages again.
    pub async fn reload(&mut self) -> UiResult<Reply> {
        self.pages = Pages::mount(&self.state, &self.config).await?;
        tracing::info!("Session reloaded");
        Ok(Reply::text("All pages reloaded from the fixtures."))
    }

    fn acting_user(&self) -> Option<&User> {
        self.pages.users.roster().get(self.config.user_id).ok()
    }

    /// Author stamped on new posts, comments and reports.
    fn me(&self) -> Author {
        let id = self.config.user_id;
        if let Some(user) = self.acting_user() {
            return Author::new(id, user.nickname.as_str());
        }
        self.pages
            .posts
            .board()
            .all()
            .iter()
            .find(|post| post.author.id == id)
            .map(|post| post.author.clone())
            .unwrap_or_else(|| Author::new(id, format!("user{id}")))
    }

    /// Writing is closed to users under an unexpired ban, and to everyone but
    /// administrators during maintenance.
    fn guard_writes(&self) -> UiResult<()> {
        let user = self.acting_user();
        let security = &self.pages.settings.current().security;
        if security.maintenance_mode && !user.map(User::is_admin).unwrap_or(false) {
            return Err(DomainError::Forbidden(security.maintenance_message.clone()).into());
        }
        let now = now();
        if user.is_some_and(|u| u.is_banned_at(now)) {
            return Err(DomainError::Forbidden("Your account is suspended.".to_string()).into());
        }
        Ok(())
    }

    /// Title or snippet of a post or comment, with its author.
    fn describe(&self, target: ContentRef) -> UiResult<(String, u64)> {
        Ok(match target.kind {
            ContentKind::Post => {
                let post = self.pages.posts.board().get(target.id)?;
                (post.title.clone(), post.author.id)
            }
            ContentKind::Comment => {
                let comment = self.pages.comments.find(target.id)?;
                (comment.content.clone(), comment.author.id)
            }
        })
    }

    fn bump_comment_count(&mut self, post_id: u64, delta: i32) -> UiResult<()> {
        let board = self.pages.posts.board_mut();
        let count = board.get(post_id)?.comment_count.saturating_add_signed(delta);
        board.set_comment_count(post_id, count)?;
        Ok(())
    }

    pub async fn execute(&mut self, command: Command) -> UiResult<Reply> {
        match command {
            Command::Home => self.pages.posts.home(self.pages.blind.blinded()),
            Command::Posts(args) => self.pages.posts.list(&args, self.pages.blind.blinded()),
            Command::Post(command) => self.post(command),
            Command::Comment(command) => self.comment(command),
            Command::Write(command) => self.write(command),
            Command::Notifications(command) => self.notifications(command),
            Command::Profile { retry } => {
                self.pages
                    .profile
                    .show(self.state.profiles.as_ref(), retry)
                    .await
            }
            Command::Trash(command) => self.trash(command),
            Command::Admin(command) => self.admin(command).await,
            Command::Api { endpoint } => api(endpoint),
            Command::Toasts => {
                let toasts = self.state.toasts.history().await;
                Ok(Reply::text(render::toasts(&toasts)))
            }
            Command::Reload => self.reload().await,
            Command::Quit => Ok(Reply::text("Bye.")),
        }
    }

    fn post(&mut self, command: PostCommand) -> UiResult<Reply> {
        match command {
            PostCommand::Show { post_id } => {
                let blinded = self.pages.blind.blinded();
                let post = self.pages.posts.open(post_id, blinded)?;
                let (comments, _) = self.pages.comments.threads(post_id, blinded)?;
                PostsPage::detail(post, &comments)
            }
            PostCommand::Like { post_id } => self.pages.posts.like(post_id),
            PostCommand::Report { post_id, reason } => {
                self.report(ContentRef::post(post_id), &reason.joined())
            }
            PostCommand::Delete { post_id } => self.delete_post(post_id),
            PostCommand::Download { post_id, file_id } => {
                self.pages.posts.download(post_id, file_id)
            }
        }
    }

    /// File a report and blind the target once enough reports are pending.
    fn report(&mut self, target: ContentRef, reason: &str) -> UiResult<Reply> {
        self.guard_writes()?;
        let security = self.pages.settings.current().security.clone();
        if !security.enable_reporting {
            return Err(DomainError::Forbidden("Reporting is disabled.".to_string()).into());
        }

        let (title, author_id) = self.describe(target)?;
        let me = self.me();
        let reply = self.pages.reports.file(target, &title, reason, &me, now())?;

        let pending = self.pages.reports.pending_against(target);
        let threshold = security.auto_blind_threshold as usize;
        if pending < threshold || self.pages.blind.blinded().is_blinded(target) {
            return Ok(reply);
        }

        let reason = format!("Automatically blinded after {pending} reports.");
        self.pages.blind.blind(target, &title, author_id, &reason, now())?;
        tracing::info!(item = %target, pending, threshold, "Auto-blind threshold reached");
        Ok(reply.with_text(format!("{target} was blinded after {pending} pending reports.")))
    }

    fn delete_post(&mut self, post_id: u64) -> UiResult<Reply> {
        let post = self.pages.posts.board_mut().remove(post_id)?;
        let comments = self
            .pages
            .comments
            .take_section(post_id)
            .unwrap_or_else(|| CommentBoard::new(post_id, Vec::new()));
        self.pages
            .categories
            .board_mut()
            .adjust_post_count(&post.category, -1);
        tracing::info!(post_id, comments = comments.len(), "Post moved to the trash");

        self.pages.trash.stash_post(post, comments, now());
        Ok(Reply::done("Post deleted.").sent(Endpoint::PostDelete, &[post_id]))
    }

    fn comment(&mut self, command: CommentCommand) -> UiResult<Reply> {
        match command {
            CommentCommand::List { post_id } => {
                self.pages.comments.list(post_id, self.pages.blind.blinded())
            }
            CommentCommand::Add {
                post_id,
                secret,
                text,
            } => self.submit_comment(post_id, None, &text.joined(), secret),
            CommentCommand::Reply {
                comment_id,
                secret,
                text,
            } => {
                let post_id = self.pages.comments.locate(comment_id)?;
                self.submit_comment(post_id, Some(comment_id), &text.joined(), secret)
            }
            CommentCommand::Edit { comment_id, text } => {
                self.guard_writes()?;
                self.pages.comments.edit(comment_id, &text.joined())
            }
            CommentCommand::Delete { comment_id } => {
                let (post_id, removed) = self.pages.comments.delete(comment_id)?;
                self.bump_comment_count(post_id, -(removed.len() as i32))?;
                self.pages.trash.stash_comments(removed, now());
                Ok(Reply::done("Comment deleted.").sent(Endpoint::CommentDelete, &[comment_id]))
            }
            CommentCommand::Like { comment_id } => self.pages.comments.like(comment_id),
            CommentCommand::Report { comment_id, reason } => {
                self.report(ContentRef::comment(comment_id), &reason.joined())
            }
        }
    }

    fn submit_comment(
        &mut self,
        post_id: u64,
        parent_id: Option<u64>,
        text: &str,
        secret: bool,
    ) -> UiResult<Reply> {
        self.guard_writes()?;
        if self.pages.blind.blinded().is_blinded(ContentRef::post(post_id)) {
            return Err(DomainError::Forbidden(
                "This post has been blinded by a moderator.".to_string(),
            )
            .into());
        }

        let me = self.me();
        let floor = self.pages.trash.max_comment_id();
        let reply = self
            .pages
            .comments
            .submit(post_id, parent_id, me, text, secret, floor, now())?;
        self.bump_comment_count(post_id, 1)?;
        Ok(reply)
    }

    fn write(&mut self, command: WriteCommand) -> UiResult<Reply> {
        if !matches!(command, WriteCommand::Submit) {
            return self
                .pages
                .editor
                .edit(command, self.pages.settings.current());
        }

        self.guard_writes()?;
        let me = self.me();
        let pages = &mut self.pages;
        pages.posts.board_mut().reserve_ids(pages.trash.max_post_id());
        let (post_id, reply) = pages.editor.submit(
            pages.posts.board_mut(),
            pages.categories.board_mut(),
            me,
            now(),
        )?;
        pages.comments.open_section(post_id);
        Ok(reply)
    }

    fn notifications(&mut self, command: NotificationCommand) -> UiResult<Reply> {
        let page = &mut self.pages.notifications;
        match command {
            NotificationCommand::List => page.list(),
            NotificationCommand::Read { notification_id } => page.read(notification_id),
            NotificationCommand::ReadAll => page.read_all(),
        }
    }

    fn trash(&mut self, command: TrashCommand) -> UiResult<Reply> {
        match command {
            TrashCommand::List { kind } => self.pages.trash.list(kind),
            TrashCommand::Restore { kind, id } => self.restore(ContentRef { kind, id }),
            TrashCommand::Purge { kind, id } => self.pages.trash.purge(ContentRef { kind, id }),
        }
    }

    /// Put trashed content back. Comments need their post, and replies their
    /// parent, to be in place first.
    fn restore(&mut self, target: ContentRef) -> UiResult<Reply> {
        let pages = &mut self.pages;
        match target.kind {
            ContentKind::Post => {
                if pages.posts.board().get(target.id).is_ok() {
                    return Err(DomainError::Conflict(format!(
                        "Post {} is already on the board.",
                        target.id
                    ))
                    .into());
                }
            }
            ContentKind::Comment => {
                if let Some(comment) = pages.trash.stashed_comment(target.id) {
                    if pages.posts.board().get(comment.post_id).is_err() {
                        return Err(DomainError::Conflict(format!(
                            "Restore post {} first.",
                            comment.post_id
                        ))
                        .into());
                    }
                    if let Some(parent_id) = comment.parent_id {
                        if pages.comments.find(parent_id).is_err() {
                            return Err(DomainError::Conflict(format!(
                                "Restore comment {parent_id} first."
                            ))
                            .into());
                        }
                    }
                }
            }
        }

        match pages.trash.take(target)? {
            Stash::Post(post, comments) => {
                pages.categories.board_mut().adjust_post_count(&post.category, 1);
                pages.comments.put_section(comments);
                pages.posts.board_mut().restore(*post)?;
            }
            Stash::Comment(comment) => {
                let post_id = pages.comments.restore(comment)?;
                self.bump_comment_count(post_id, 1)?;
            }
            Stash::Record => {
                tracing::debug!(item = %target, "Restored a trash row without stashed content");
            }
        }
        tracing::info!(item = %target, "Restored from the trash");

        let (message, endpoint) = match target.kind {
            ContentKind::Post => ("Post restored.", Endpoint::TrashPostRestore),
            ContentKind::Comment => ("Comment restored.", Endpoint::TrashCommentRestore),
        };
        Ok(Reply::done(message).sent(endpoint, &[target.id]))
    }

    async fn admin(&mut self, command: AdminCommand) -> UiResult<Reply> {
        match command {
            AdminCommand::Reports(command) => self.reports(command),
            AdminCommand::Blind(command) => self.blind(command),
            AdminCommand::Users(command) => self.users(command),
            AdminCommand::Categories(command) => self.categories(command),
            AdminCommand::Stats { period } => {
                let pending = self.pages.reports.pending_count();
                admin::stats::show(self.state.fixtures.as_ref(), period, pending).await
            }
            AdminCommand::Settings(command) => self.settings(command),
            AdminCommand::Logs(command) => self.logs(command),
        }
    }

    fn reports(&mut self, command: ReportsCommand) -> UiResult<Reply> {
        let page = &mut self.pages.reports;
        match command {
            ReportsCommand::List {
                kind,
                status,
                search,
            } => page.list(kind, status, search.as_deref()),
            ReportsCommand::Process { report_id } => page.process(report_id),
            ReportsCommand::Reject { report_id } => page.reject(report_id),
            ReportsCommand::Status { report_id, status } => page.set_status(report_id, status),
        }
    }

    fn blind(&mut self, command: BlindCommand) -> UiResult<Reply> {
        match command {
            BlindCommand::List { kind } => self.pages.blind.list(kind),
            BlindCommand::Add { kind, id, reason } => {
                let target = ContentRef { kind, id };
                let (snippet, author_id) = self.describe(target)?;
                self.pages
                    .blind
                    .blind(target, &snippet, author_id, &reason.joined(), now())
            }
            BlindCommand::Remove { kind, id } => self.pages.blind.unblind(ContentRef { kind, id }),
        }
    }

    fn users(&mut self, command: UsersCommand) -> UiResult<Reply> {
        let page = &mut self.pages.users;
        match command {
            UsersCommand::List { filter, search } => page.list(filter, search.as_deref(), now()),
            UsersCommand::Ban {
                user_id,
                duration,
                reason,
            } => page.ban(user_id, &reason.joined(), duration, now()),
            UsersCommand::Unban { user_id } => page.unban(user_id, now()),
        }
    }

    fn categories(&mut self, command: CategoriesCommand) -> UiResult<Reply> {
        let page = &mut self.pages.categories;
        match command {
            CategoriesCommand::List => page.list(),
            CategoriesCommand::Add(args) => page.add(&args, now()),
            CategoriesCommand::Edit {
                category_id,
                fields,
            } => self.edit_category(category_id, &fields),
            CategoriesCommand::Delete { category_id } => page.delete(category_id),
            CategoriesCommand::Move {
                category_id,
                direction,
            } => page.move_category(category_id, direction),
        }
    }

    /// Edit a category. A rename relabels its posts.
    fn edit_category(&mut self, category_id: u64, fields: &CategoryEdit) -> UiResult<Reply> {
        let pages = &mut self.pages;
        let before = pages.categories.board().get(category_id)?.name.clone();
        let reply = pages.categories.edit(category_id, fields)?;
        let after = &pages.categories.board().get(category_id)?.name;
        if *after != before {
            let moved = pages.posts.board_mut().relabel(&before, after);
            tracing::info!(
                category_id,
                from = %before,
                to = %after,
                moved,
                "Posts follow the renamed category"
            );
        }
        Ok(reply)
    }

    fn settings(&mut self, command: SettingsCommand) -> UiResult<Reply> {
        let page = &mut self.pages.settings;
        match command {
            SettingsCommand::Show => page.show(),
            SettingsCommand::Set { key, value } => page.set(&key, &value.joined()),
            SettingsCommand::Save { section } => page.save(section),
            SettingsCommand::Discard => Ok(page.discard()),
        }
    }

    fn logs(&self, command: LogsCommand) -> UiResult<Reply> {
        let page = &self.pages.logs;
        match command {
            LogsCommand::System { level, filter } => {
                let query = LogQuery {
                    level,
                    search: filter.search.clone(),
                    ..LogQuery::default()
                };
                page.system(&query, &filter)
            }
            LogsCommand::Actions { action, filter } => {
                let query = LogQuery {
                    action_type: action,
                    search: filter.search.clone(),
                    ..LogQuery::default()
                };
                page.actions(&query, &filter)
            }
            LogsCommand::Errors { severity, filter } => {
                let query = LogQuery {
                    severity,
                    search: filter.search.clone(),
                    ..LogQuery::default()
                };
                page.errors(&query, &filter)
            }
        }
    }
}

/// The catalog entry for one endpoint, or the index of all of them.
fn api(endpoint: Option<Endpoint>) -> UiResult<Reply> {
    match endpoint {
        Some(endpoint) => {
            let info = endpoint.info();
            Reply::view(render::api_info(&info), &info)
        }
        None => {
            let index: Vec<String> = Endpoint::ALL
                .iter()
                .map(|e| format!("{:<24} {}", e.key(), e.info().signature()))
                .collect();
            Ok(Reply::text(index.join("\n")))
        }
    }
}
