//! Shell command grammar. Each input line is split with `shell-words` and
//! parsed as a [`Line`].

use clap::{Args, Parser, Subcommand};

use agora_core::domain::{
    ActionType, BanDuration, ContentKind, FeedKind, LogLevel, MoveDirection, PostSort,
    ReportStatus, SettingsSection, Severity, StatsPeriod, UserFilter,
};
use agora_shared::Endpoint;

/// One line typed at the prompt.
#[derive(Debug, Parser)]
#[command(name = "agora", no_binary_name = true, disable_version_flag = true)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

/// Free text spread over the rest of the line. Quoting is optional.
#[derive(Debug, Clone, Default, Args)]
pub struct Text {
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub words: Vec<String>,
}

impl Text {
    pub fn joined(&self) -> String {
        self.words.join(" ")
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Home screen: notices, pinned posts and everything else
    Home,
    /// Post listing with tabs, sorting, search and paging
    Posts(ListArgs),
    /// Post detail and its actions
    #[command(subcommand)]
    Post(PostCommand),
    /// Comment section of a post
    #[command(subcommand)]
    Comment(CommentCommand),
    /// Post editor
    #[command(subcommand)]
    Write(WriteCommand),
    /// The viewer's notifications
    #[command(subcommand)]
    Notifications(NotificationCommand),
    /// "My profile" page
    Profile {
        /// Load the profile again, e.g. after a failure
        #[arg(long)]
        retry: bool,
    },
    /// Deleted posts and comments
    #[command(subcommand)]
    Trash(TrashCommand),
    /// Administrator pages
    #[command(subcommand)]
    Admin(AdminCommand),
    /// Show the documented API entry for an endpoint, or list them all
    Api { endpoint: Option<Endpoint> },
    /// Toasts shown so far
    Toasts,
    /// Remount every page from the fixtures, discarding all changes
    Reload,
    /// Leave the console
    #[command(alias = "exit")]
    Quit,
}

/// Listing state. Unset flags keep their previous value.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Tab: all, notice or popular
    #[arg(long)]
    pub feed: Option<FeedKind>,
    /// latest, popular, comments or views
    #[arg(long)]
    pub sort: Option<PostSort>,
    #[arg(long)]
    pub page: Option<usize>,
    #[arg(long)]
    pub size: Option<usize>,
    /// Category label, `all` for every category
    #[arg(long)]
    pub category: Option<String>,
    /// Title keyword
    #[arg(long)]
    pub title: Option<String>,
    /// Author name keyword
    #[arg(long)]
    pub author: Option<String>,
    /// Drop the search filters
    #[arg(long)]
    pub clear: bool,
}

#[derive(Debug, Subcommand)]
pub enum PostCommand {
    /// Open a post together with its comments
    Show { post_id: u64 },
    /// Toggle the viewer's like
    Like { post_id: u64 },
    /// Report a post to the moderators
    Report {
        post_id: u64,
        #[command(flatten)]
        reason: Text,
    },
    /// Move a post to the trash
    Delete { post_id: u64 },
    /// Download an attachment
    Download { post_id: u64, file_id: u64 },
}

#[derive(Debug, Subcommand)]
pub enum CommentCommand {
    /// Comment threads of a post
    List { post_id: u64 },
    /// Write a top-level comment
    Add {
        post_id: u64,
        #[arg(long)]
        secret: bool,
        #[command(flatten)]
        text: Text,
    },
    /// Reply to a comment
    Reply {
        comment_id: u64,
        #[arg(long)]
        secret: bool,
        #[command(flatten)]
        text: Text,
    },
    Edit {
        comment_id: u64,
        #[command(flatten)]
        text: Text,
    },
    /// Delete a comment and its replies
    Delete { comment_id: u64 },
    Like { comment_id: u64 },
    Report {
        comment_id: u64,
        #[command(flatten)]
        reason: Text,
    },
}

#[derive(Debug, Subcommand)]
pub enum WriteCommand {
    /// Show the draft
    Show,
    Title(Text),
    Content(Text),
    Category(Text),
    /// Mark the draft as a notice
    Notice {
        #[arg(long)]
        off: bool,
    },
    /// Pin the draft to the top of the board
    Pinned {
        #[arg(long)]
        off: bool,
    },
    Tag(Text),
    Untag(Text),
    /// Attach a file of the given size in bytes
    Attach { name: String, bytes: u64 },
    Detach { name: String },
    /// Publish the draft
    Submit,
    /// Discard the draft
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum NotificationCommand {
    List,
    Read { notification_id: u64 },
    ReadAll,
}

#[derive(Debug, Subcommand)]
pub enum TrashCommand {
    List {
        #[arg(long)]
        kind: Option<ContentKind>,
    },
    /// Put a post or comment back where it was
    Restore { kind: ContentKind, id: u64 },
    /// Delete for good
    Purge { kind: ContentKind, id: u64 },
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    #[command(subcommand)]
    Reports(ReportsCommand),
    #[command(subcommand)]
    Blind(BlindCommand),
    #[command(subcommand)]
    Users(UsersCommand),
    #[command(subcommand)]
    Categories(CategoriesCommand),
    /// Overview counters and activity charts
    Stats {
        #[arg(long, default_value = "week")]
        period: StatsPeriod,
    },
    #[command(subcommand)]
    Settings(SettingsCommand),
    #[command(subcommand)]
    Logs(LogsCommand),
}

#[derive(Debug, Subcommand)]
pub enum ReportsCommand {
    List {
        #[arg(long, default_value = "post")]
        kind: ContentKind,
        #[arg(long)]
        status: Option<ReportStatus>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Accept a pending report
    Process { report_id: u64 },
    /// Dismiss a pending report
    Reject { report_id: u64 },
    /// Re-label a report that was already reviewed
    Status {
        report_id: u64,
        status: ReportStatus,
    },
}

#[derive(Debug, Subcommand)]
pub enum BlindCommand {
    List {
        #[arg(long)]
        kind: Option<ContentKind>,
    },
    /// Hide a post or comment
    Add {
        kind: ContentKind,
        id: u64,
        #[command(flatten)]
        reason: Text,
    },
    /// Lift a blind
    #[command(alias = "unblind")]
    Remove { kind: ContentKind, id: u64 },
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    List {
        /// all, admins, users or banned
        #[arg(long, default_value = "all")]
        filter: UserFilter,
        #[arg(long)]
        search: Option<String>,
    },
    Ban {
        user_id: u64,
        /// 1, 3, 7, 30 or permanent
        #[arg(long, default_value = "7")]
        duration: BanDuration,
        #[command(flatten)]
        reason: Text,
    },
    Unban { user_id: u64 },
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    List,
    Add(CategoryArgs),
    /// Change some fields; the rest keep their current values
    Edit {
        category_id: u64,
        #[command(flatten)]
        fields: CategoryEdit,
    },
    Delete { category_id: u64 },
    Move {
        category_id: u64,
        direction: MoveDirection,
    },
}

#[derive(Debug, Clone, Args)]
pub struct CategoryArgs {
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long)]
    pub hidden: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct CategoryEdit {
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, conflicts_with = "visible")]
    pub hidden: bool,
    #[arg(long)]
    pub visible: bool,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    Show,
    /// Change one field of the form
    Set {
        key: String,
        #[command(flatten)]
        value: Text,
    },
    /// Save one section
    Save { section: SettingsSection },
    /// Throw away unsaved changes
    Discard,
}

#[derive(Debug, Subcommand)]
pub enum LogsCommand {
    System {
        #[arg(long)]
        level: Option<LogLevel>,
        #[command(flatten)]
        filter: LogArgs,
    },
    Actions {
        #[arg(long)]
        action: Option<ActionType>,
        #[command(flatten)]
        filter: LogArgs,
    },
    Errors {
        #[arg(long)]
        severity: Option<Severity>,
        #[command(flatten)]
        filter: LogArgs,
    },
}

#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    #[arg(long, default_value_t = 50)]
    pub size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        let tokens = shell_words::split(line).unwrap();
        Line::try_parse_from(tokens).unwrap().command
    }

    #[test]
    fn reasons_may_be_unquoted() {
        match parse("post report 3 spam and ads") {
            Command::Post(PostCommand::Report { post_id, reason }) => {
                assert_eq!(post_id, 3);
                assert_eq!(reason.joined(), "spam and ads");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_reason_still_parses() {
        match parse("admin users ban 4") {
            Command::Admin(AdminCommand::Users(UsersCommand::Ban {
                user_id,
                duration,
                reason,
            })) => {
                assert_eq!(user_id, 4);
                assert_eq!(duration, BanDuration::Days(7));
                assert!(reason.joined().is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn typed_arguments_parse_through_domain_types() {
        match parse("posts --feed popular --sort views --page 2") {
            Command::Posts(args) => {
                assert_eq!(args.feed, Some(FeedKind::Popular));
                assert_eq!(args.sort, Some(PostSort::Views));
                assert_eq!(args.page, Some(2));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            parse("api users.ban"),
            Command::Api {
                endpoint: Some(Endpoint::UserBan)
            }
        ));
    }

    #[test]
    fn unknown_values_are_rejected() {
        let tokens = shell_words::split("admin users ban 4 --duration 5 spam").unwrap();
        assert!(Line::try_parse_from(tokens).is_err());
        assert!(Line::try_parse_from(["posts", "--feed", "hot"]).is_err());
    }

    #[test]
    fn secret_flag_precedes_the_text() {
        match parse("comment add 1 --secret \"only for you\"") {
            Command::Comment(CommentCommand::Add {
                post_id,
                secret,
                text,
            }) => {
                assert_eq!(post_id, 1);
                assert!(secret);
                assert_eq!(text.joined(), "only for you");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn category_edit_fields_are_optional() {
        match parse("admin categories edit 2 --description \"Talk about anything\"") {
            Command::Admin(AdminCommand::Categories(CategoriesCommand::Edit {
                category_id,
                fields,
            })) => {
                assert_eq!(category_id, 2);
                assert!(fields.name.is_none());
                assert_eq!(fields.description.as_deref(), Some("Talk about anything"));
                assert!(!fields.hidden && !fields.visible);
            }
            other => panic!("unexpected {other:?}"),
        }
        let tokens = shell_words::split("admin categories edit 2 --hidden --visible").unwrap();
        assert!(Line::try_parse_from(tokens).is_err());
    }
}
