use std::cmp::Reverse;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::likes::Likes;
use crate::error::{DomainError, DomainResult, require};

/// Posts with more likes than this show up in the "popular" feed.
pub const POPULAR_LIKE_THRESHOLD: u32 = 5;

/// Display identity of whoever wrote a post or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: u64,
    pub name: String,
    pub avatar: String,
}

impl Author {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar: "/placeholder.svg?height=32&width=32".to_string(),
        }
    }

    /// Two-character fallback shown when the avatar fails to load.
    pub fn initials(&self) -> String {
        self.name.chars().take(2).collect()
    }
}

/// File attached to a post. `size` is already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: u64,
    pub name: String,
    pub size: String,
}

/// Render a byte count the way attachment lists show it (`1.2MB`, `980.5KB`).
pub fn format_file_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let bytes = bytes as f64;
    if bytes >= MB {
        format!("{:.1}MB", bytes / MB)
    } else {
        format!("{:.1}KB", bytes / KB)
    }
}

/// Post entity - a board article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub author: Author,
    pub category: String,
    pub created_at: NaiveDateTime,
    pub view_count: u32,
    pub likes: Likes,
    pub comment_count: u32,
    pub is_notice: bool,
    pub is_pinned: bool,
    pub tags: Vec<String>,
    pub files: Vec<Attachment>,
}

impl Post {
    pub fn is_popular(&self) -> bool {
        self.likes.count > POPULAR_LIKE_THRESHOLD
    }

    pub fn attachment(&self, file_id: u64) -> DomainResult<&Attachment> {
        self.files
            .iter()
            .find(|file| file.id == file_id)
            .ok_or(DomainError::not_found("File", file_id))
    }
}

/// The tabs of the post listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedKind {
    #[default]
    All,
    Notice,
    Popular,
}

impl FeedKind {
    pub fn admits(&self, post: &Post) -> bool {
        match self {
            FeedKind::All => true,
            FeedKind::Notice => post.is_notice,
            FeedKind::Popular => post.is_popular(),
        }
    }
}

impl FromStr for FeedKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(FeedKind::All),
            "notice" => Ok(FeedKind::Notice),
            "popular" => Ok(FeedKind::Popular),
            other => Err(DomainError::Validation(format!("unknown feed `{other}`"))),
        }
    }
}

/// Sort keys accepted by the post listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PostSort {
    #[default]
    Latest,
    Popular,
    Comments,
    Views,
}

impl PostSort {
    fn key(&self, post: &Post) -> u32 {
        match self {
            PostSort::Latest => 0,
            PostSort::Popular => post.likes.count,
            PostSort::Comments => post.comment_count,
            PostSort::Views => post.view_count,
        }
    }
}

impl FromStr for PostSort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(PostSort::Latest),
            "popular" => Ok(PostSort::Popular),
            "comments" => Ok(PostSort::Comments),
            "views" => Ok(PostSort::Views),
            other => Err(DomainError::Validation(format!("unknown sort `{other}`"))),
        }
    }
}

/// Search form: every populated field must match (case-insensitive substring,
/// exact match for the category label).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    pub category: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
}

impl PostQuery {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.title.is_none() && self.author.is_none()
    }

    pub fn matches(&self, post: &Post) -> bool {
        let contains = |haystack: &str, needle: &Option<String>| {
            needle
                .as_deref()
                .map(|n| haystack.to_lowercase().contains(&n.to_lowercase()))
                .unwrap_or(true)
        };

        self.category
            .as_deref()
            .map(|c| c == "all" || post.category == c)
            .unwrap_or(true)
            && contains(&post.title, &self.title)
            && contains(&post.author.name, &self.author)
    }
}

/// Form state of the post editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub category: String,
    pub is_notice: bool,
    pub is_pinned: bool,
    tags: Vec<String>,
    files: Vec<Attachment>,
}

impl PostDraft {
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn files(&self) -> &[Attachment] {
        &self.files
    }

    /// Add a tag from raw input. Blank and duplicate input is ignored.
    pub fn add_tag(&mut self, input: &str) -> bool {
        let tag = input.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn attach(&mut self, name: impl Into<String>, bytes: u64) -> &Attachment {
        let id = self.files.iter().map(|f| f.id).max().unwrap_or(0) + 1;
        self.files.push(Attachment {
            id,
            name: name.into(),
            size: format_file_size(bytes),
        });
        &self.files[self.files.len() - 1]
    }

    pub fn detach(&mut self, name: &str) -> bool {
        let before = self.files.len();
        self.files.retain(|f| f.name != name);
        self.files.len() != before
    }

    /// Required fields, checked in form order.
    pub fn validate(&self) -> DomainResult<()> {
        require(&self.title, "Please enter a title.")?;
        require(&self.content, "Please enter the content.")?;
        require(&self.category, "Please choose a category.")?;
        Ok(())
    }
}

/// The post listing's local copy of the posts.
#[derive(Debug, Clone, Default)]
pub struct PostBoard {
    posts: Vec<Post>,
    next_id: u64,
}

impl PostBoard {
    pub fn new(posts: Vec<Post>) -> Self {
        let next_id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self { posts, next_id }
    }

    /// Never hand out ids at or below `floor`, e.g. ids still held by the
    /// trash.
    pub fn reserve_ids(&mut self, floor: u64) {
        self.next_id = self.next_id.max(floor + 1);
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn all(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, id: u64) -> DomainResult<&Post> {
        self.posts
            .iter()
            .find(|p| p.id == id)
            .ok_or(DomainError::not_found("Post", id))
    }

    fn get_mut(&mut self, id: u64) -> DomainResult<&mut Post> {
        self.posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DomainError::not_found("Post", id))
    }

    /// Posts of one tab: pinned posts first, then by the sort key, newest first
    /// on ties.
    pub fn feed(&self, kind: FeedKind, sort: PostSort, query: &PostQuery) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self
            .posts
            .iter()
            .filter(|p| kind.admits(p) && query.matches(p))
            .collect();

        posts.sort_by_key(|p| (!p.is_pinned, Reverse(sort.key(p)), Reverse(p.created_at)));
        posts
    }

    /// Toggle the viewer's like. Returns the updated counter.
    pub fn toggle_like(&mut self, id: u64) -> DomainResult<Likes> {
        let post = self.get_mut(id)?;
        post.likes.toggle();
        tracing::debug!(post_id = id, liked = post.likes.liked, "post like toggled");
        Ok(post.likes)
    }

    pub fn record_view(&mut self, id: u64) -> DomainResult<u32> {
        let post = self.get_mut(id)?;
        post.view_count += 1;
        Ok(post.view_count)
    }

    /// Turn a validated draft into a new post at the top of the board.
    pub fn publish(
        &mut self,
        draft: &PostDraft,
        author: Author,
        now: NaiveDateTime,
    ) -> DomainResult<&Post> {
        draft.validate()?;

        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.posts.push(Post {
            id,
            title: draft.title.trim().to_string(),
            content: draft.content.trim().to_string(),
            author,
            category: draft.category.trim().to_string(),
            created_at: now,
            view_count: 0,
            likes: Likes::default(),
            comment_count: 0,
            is_notice: draft.is_notice,
            is_pinned: draft.is_pinned,
            tags: draft.tags.clone(),
            files: draft.files.clone(),
        });
        Ok(&self.posts[self.posts.len() - 1])
    }

    /// Take a post off the board, handing it back to the caller.
    pub fn remove(&mut self, id: u64) -> DomainResult<Post> {
        let index = self
            .posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(DomainError::not_found("Post", id))?;
        Ok(self.posts.remove(index))
    }

    /// Put a post back (restore from trash). Existing ids are refused.
    pub fn restore(&mut self, post: Post) -> DomainResult<()> {
        if self.posts.iter().any(|p| p.id == post.id) {
            return Err(DomainError::Conflict(format!(
                "Post {} is already on the board.",
                post.id
            )));
        }
        self.next_id = self.next_id.max(post.id + 1);
        self.posts.push(post);
        Ok(())
    }

    pub fn set_comment_count(&mut self, id: u64, count: u32) -> DomainResult<()> {
        self.get_mut(id)?.comment_count = count;
        Ok(())
    }

    /// Move every post filed under category `from` to `to`. Returns how many
    /// posts changed.
    pub fn relabel(&mut self, from: &str, to: &str) -> usize {
        let mut moved = 0;
        for post in self.posts.iter_mut().filter(|p| p.category == from) {
            post.category = to.to_string();
            moved += 1;
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn post(id: u64, created_at: NaiveDateTime, likes: u32, notice: bool, pinned: bool) -> Post {
        Post {
            id,
            title: format!("post {id}"),
            content: "body".to_string(),
            author: Author::new(100 + id, format!("author{id}")),
            category: if notice { "Notice" } else { "Free Board" }.to_string(),
            created_at,
            view_count: id as u32 * 10,
            likes: Likes::new(likes, false),
            comment_count: 0,
            is_notice: notice,
            is_pinned: pinned,
            tags: Vec::new(),
            files: Vec::new(),
        }
    }

    fn board() -> PostBoard {
        PostBoard::new(vec![
            post(1, at(20, 14), 5, true, true),
            post(2, at(19, 10), 4, true, false),
            post(3, at(18, 9), 7, false, false),
            post(4, at(17, 16), 2, false, false),
            post(5, at(21, 11), 12, false, false),
        ])
    }

    fn ids(posts: &[&Post]) -> Vec<u64> {
        posts.iter().map(|p| p.id).collect()
    }

    #[test]
    fn all_feed_puts_pinned_first_then_newest() {
        let board = board();
        let feed = board.feed(FeedKind::All, PostSort::Latest, &PostQuery::default());
        assert_eq!(ids(&feed), vec![1, 5, 2, 3, 4]);
    }

    #[test]
    fn notice_feed_only_has_notices() {
        let board = board();
        let feed = board.feed(FeedKind::Notice, PostSort::Latest, &PostQuery::default());
        assert_eq!(ids(&feed), vec![1, 2]);
        assert!(feed.iter().all(|p| p.is_notice));
    }

    #[test]
    fn popular_feed_requires_more_than_threshold_likes() {
        let board = board();
        let feed = board.feed(FeedKind::Popular, PostSort::Latest, &PostQuery::default());
        // post 1 has exactly five likes and stays out
        assert_eq!(ids(&feed), vec![5, 3]);
    }

    #[test]
    fn sort_key_applies_inside_pinned_groups() {
        let board = board();
        let feed = board.feed(FeedKind::All, PostSort::Views, &PostQuery::default());
        assert_eq!(ids(&feed), vec![1, 5, 4, 3, 2]);
    }

    #[test]
    fn search_matches_title_and_author_case_insensitively() {
        let board = board();
        let query = PostQuery {
            title: Some("POST 3".to_string()),
            ..Default::default()
        };
        assert_eq!(
            ids(&board.feed(FeedKind::All, PostSort::Latest, &query)),
            vec![3]
        );

        let query = PostQuery {
            category: Some("Notice".to_string()),
            author: Some("Author2".to_string()),
            ..Default::default()
        };
        assert_eq!(
            ids(&board.feed(FeedKind::All, PostSort::Latest, &query)),
            vec![2]
        );
    }

    #[test]
    fn double_like_restores_the_starting_state() {
        let mut board = board();
        let before = board.get(3).unwrap().likes;
        assert_eq!(board.toggle_like(3).unwrap(), Likes::new(8, true));
        assert_eq!(board.toggle_like(3).unwrap(), before);
    }

    #[test]
    fn draft_reports_first_missing_field() {
        let mut draft = PostDraft {
            content: "text".to_string(),
            ..Default::default()
        };
        assert_eq!(
            draft.validate(),
            Err(DomainError::MissingField("Please enter a title."))
        );

        draft.title = "title".to_string();
        assert_eq!(
            draft.validate(),
            Err(DomainError::MissingField("Please choose a category."))
        );
    }

    #[test]
    fn publish_with_missing_field_leaves_board_alone() {
        let mut board = board();
        let draft = PostDraft {
            title: "  ".to_string(),
            content: "x".to_string(),
            category: "Free Board".to_string(),
            ..Default::default()
        };
        assert!(board.publish(&draft, Author::new(1, "me"), at(22, 9)).is_err());
        assert_eq!(board.len(), 5);
    }

    #[test]
    fn publish_assigns_next_id_and_trims() {
        let mut board = board();
        let mut draft = PostDraft {
            title: " Hello ".to_string(),
            content: "World".to_string(),
            category: "Free Board".to_string(),
            ..Default::default()
        };
        assert!(draft.add_tag(" rust "));
        assert!(!draft.add_tag("rust"));
        assert!(!draft.add_tag("   "));
        draft.attach("plan.pdf", 1_258_291);

        let post = board.publish(&draft, Author::new(1, "me"), at(22, 9)).unwrap();
        assert_eq!(post.id, 6);
        assert_eq!(post.title, "Hello");
        assert_eq!(post.tags, vec!["rust".to_string()]);
        assert_eq!(post.files[0].size, "1.2MB");
    }

    #[test]
    fn file_sizes_are_human_readable() {
        assert_eq!(format_file_size(1_024_000), "1000.0KB");
        assert_eq!(format_file_size(2 * 1024 * 1024), "2.0MB");
    }

    #[test]
    fn remove_and_restore_round_trip() {
        let mut board = board();
        let removed = board.remove(4).unwrap();
        assert!(board.get(4).is_err());
        board.restore(removed.clone()).unwrap();
        assert!(matches!(
            board.restore(removed),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn relabel_follows_a_category_rename() {
        let mut board = board();
        assert_eq!(board.relabel("Notice", "Announcements"), 2);
        let query = PostQuery {
            category: Some("Announcements".to_string()),
            ..PostQuery::default()
        };
        let feed = board.feed(FeedKind::All, PostSort::Latest, &query);
        assert_eq!(ids(&feed), vec![1, 2]);
        assert_eq!(board.relabel("Notice", "Announcements"), 0);
    }
}
