use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::likes::Likes;
use super::post::Author;
use crate::error::{DomainError, DomainResult, require};

const EMPTY_COMMENT: &str = "Please enter a comment.";

/// Comment entity. `parent_id` is set only on replies, and replies are never
/// nested more than one level deep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    pub content: String,
    pub author: Author,
    pub created_at: NaiveDateTime,
    pub likes: Likes,
    /// Visible to restricted viewers only. Not enforced anywhere.
    pub is_secret: bool,
    pub parent_id: Option<u64>,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// A top-level comment and its replies, in posting order.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentThread<'a> {
    pub root: &'a Comment,
    pub replies: Vec<&'a Comment>,
}

/// The comment section of one post.
#[derive(Debug, Clone, Default)]
pub struct CommentBoard {
    post_id: u64,
    comments: Vec<Comment>,
    next_id: u64,
}

impl CommentBoard {
    pub fn new(post_id: u64, comments: Vec<Comment>) -> Self {
        let next_id = comments.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        Self {
            post_id,
            comments,
            next_id,
        }
    }

    /// Never hand out ids at or below `floor`. Comment ids are unique across
    /// posts, so callers holding several boards raise every floor together.
    pub fn reserve_ids(&mut self, floor: u64) {
        self.next_id = self.next_id.max(floor + 1);
    }

    /// Highest id this board has handed out or holds.
    pub fn max_id(&self) -> u64 {
        self.next_id.saturating_sub(1)
    }

    pub fn post_id(&self) -> u64 {
        self.post_id
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn get(&self, id: u64) -> DomainResult<&Comment> {
        self.comments
            .iter()
            .find(|c| c.id == id)
            .ok_or(DomainError::not_found("Comment", id))
    }

    fn get_mut(&mut self, id: u64) -> DomainResult<&mut Comment> {
        self.comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DomainError::not_found("Comment", id))
    }

    /// Group comments into root/reply threads. Replies whose parent is gone are
    /// not shown.
    pub fn threads(&self) -> Vec<CommentThread<'_>> {
        self.comments
            .iter()
            .filter(|c| c.parent_id.is_none())
            .map(|root| CommentThread {
                root,
                replies: self
                    .comments
                    .iter()
                    .filter(|c| c.parent_id == Some(root.id))
                    .collect(),
            })
            .collect()
    }

    fn insert(
        &mut self,
        author: Author,
        text: &str,
        is_secret: bool,
        parent_id: Option<u64>,
        now: NaiveDateTime,
    ) -> DomainResult<&Comment> {
        let content = require(text, EMPTY_COMMENT)?;
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        let comment = Comment {
            id,
            post_id: self.post_id,
            content,
            author,
            created_at: now,
            likes: Likes::default(),
            is_secret,
            parent_id,
        };
        tracing::debug!(
            post_id = self.post_id,
            comment_id = comment.id,
            parent_id = ?parent_id,
            "comment added"
        );
        self.comments.push(comment);
        Ok(&self.comments[self.comments.len() - 1])
    }

    pub fn post(
        &mut self,
        author: Author,
        text: &str,
        is_secret: bool,
        now: NaiveDateTime,
    ) -> DomainResult<&Comment> {
        self.insert(author, text, is_secret, None, now)
    }

    /// Reply to a comment. Replying to a reply attaches to the same root so the
    /// tree stays one level deep.
    pub fn reply(
        &mut self,
        parent_id: u64,
        author: Author,
        text: &str,
        is_secret: bool,
        now: NaiveDateTime,
    ) -> DomainResult<&Comment> {
        let parent = self.get(parent_id)?;
        let root_id = parent.parent_id.unwrap_or(parent.id);
        self.insert(author, text, is_secret, Some(root_id), now)
    }

    pub fn edit(&mut self, id: u64, text: &str) -> DomainResult<&Comment> {
        let content = require(text, EMPTY_COMMENT)?;
        let comment = self.get_mut(id)?;
        comment.content = content;
        Ok(comment)
    }

    /// Remove a comment together with its replies. Returns everything removed,
    /// the comment itself first.
    pub fn delete(&mut self, id: u64) -> DomainResult<Vec<Comment>> {
        self.get(id)?;

        let (removed, kept): (Vec<Comment>, Vec<Comment>) = std::mem::take(&mut self.comments)
            .into_iter()
            .partition(|c| c.id == id || c.parent_id == Some(id));
        self.comments = kept;

        let mut removed = removed;
        removed.sort_by_key(|c| c.id != id);
        Ok(removed)
    }

    pub fn toggle_like(&mut self, id: u64) -> DomainResult<Likes> {
        let comment = self.get_mut(id)?;
        comment.likes.toggle();
        Ok(comment.likes)
    }

    pub fn restore(&mut self, comment: Comment) -> DomainResult<()> {
        if comment.post_id != self.post_id {
            return Err(DomainError::Validation(format!(
                "comment {} belongs to post {}",
                comment.id, comment.post_id
            )));
        }
        if self.comments.iter().any(|c| c.id == comment.id) {
            return Err(DomainError::Conflict(format!(
                "Comment {} already exists.",
                comment.id
            )));
        }
        self.next_id = self.next_id.max(comment.id + 1);
        self.comments.push(comment);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 21)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn comment(id: u64, parent_id: Option<u64>) -> Comment {
        Comment {
            id,
            post_id: 1,
            content: format!("comment {id}"),
            author: Author::new(101, "Gildong Hong"),
            created_at: now(),
            likes: Likes::new(id as u32, false),
            is_secret: false,
            parent_id,
        }
    }

    fn board() -> CommentBoard {
        CommentBoard::new(1, vec![comment(1, None), comment(2, None), comment(3, Some(2))])
    }

    #[test]
    fn threads_group_replies_under_roots() {
        let board = board();
        let threads = board.threads();
        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].root.id, 1);
        assert!(threads[0].replies.is_empty());
        assert_eq!(threads[1].root.id, 2);
        assert_eq!(threads[1].replies[0].id, 3);
    }

    #[test]
    fn empty_comment_is_rejected_without_change() {
        let mut board = board();
        let err = board
            .post(Author::new(101, "me"), "  \t ", false, now())
            .unwrap_err();
        assert_eq!(err, DomainError::MissingField(EMPTY_COMMENT));
        assert_eq!(board.len(), 3);

        assert!(board.edit(1, "").is_err());
        assert_eq!(board.get(1).unwrap().content, "comment 1");
    }

    #[test]
    fn reply_to_reply_stays_one_level_deep() {
        let mut board = board();
        let reply = board
            .reply(3, Author::new(102, "Sunsin Yi"), "me too", true, now())
            .unwrap();
        assert_eq!(reply.id, 4);
        assert_eq!(reply.parent_id, Some(2));
        assert!(reply.is_secret);
        assert_eq!(board.threads()[1].replies.len(), 2);
    }

    #[test]
    fn reply_to_missing_parent_fails() {
        let mut board = board();
        assert_eq!(
            board.reply(42, Author::new(1, "x"), "hi", false, now()),
            Err(DomainError::not_found("Comment", 42))
        );
    }

    #[test]
    fn delete_takes_replies_along() {
        let mut board = board();
        let removed = board.delete(2).unwrap();
        assert_eq!(removed.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let mut board = board();
        board.delete(2).unwrap();
        board.reserve_ids(10);
        let fresh = board.post(Author::new(101, "me"), "again", false, now()).unwrap();
        assert_eq!(fresh.id, 11);
        assert_eq!(board.max_id(), 11);
    }

    #[test]
    fn like_toggle_is_symmetric() {
        let mut board = board();
        assert_eq!(board.toggle_like(2).unwrap(), Likes::new(3, true));
        assert_eq!(board.toggle_like(2).unwrap(), Likes::new(2, false));
    }
}
