//! Comment sections, one per post. Comment ids are unique across sections.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde_json::json;

use agora_core::DomainError;
use agora_core::domain::{Author, BlindList, Comment, CommentBoard, ContentRef};
use agora_shared::Endpoint;
use agora_shared::dto::{CommentInfo, CreateCommentRequest, CreatedComment};

use crate::error::UiResult;
use crate::render::{self, CommentLine};
use crate::reply::Reply;

#[derive(Default)]
pub struct CommentsPage {
    sections: HashMap<u64, CommentBoard>,
}

impl CommentsPage {
    pub fn new(sections: impl IntoIterator<Item = CommentBoard>) -> Self {
        Self {
            sections: sections
                .into_iter()
                .map(|board| (board.post_id(), board))
                .collect(),
        }
    }

    pub fn section(&self, post_id: u64) -> UiResult<&CommentBoard> {
        Ok(self
            .sections
            .get(&post_id)
            .ok_or(DomainError::not_found("Post", post_id))?)
    }

    fn section_mut(&mut self, post_id: u64) -> UiResult<&mut CommentBoard> {
        Ok(self
            .sections
            .get_mut(&post_id)
            .ok_or(DomainError::not_found("Post", post_id))?)
    }

    /// Give a new post an empty section.
    pub fn open_section(&mut self, post_id: u64) {
        self.sections
            .entry(post_id)
            .or_insert_with(|| CommentBoard::new(post_id, Vec::new()));
    }

    pub fn take_section(&mut self, post_id: u64) -> Option<CommentBoard> {
        self.sections.remove(&post_id)
    }

    pub fn put_section(&mut self, board: CommentBoard) {
        self.sections.insert(board.post_id(), board);
    }

    /// The post a comment belongs to.
    pub fn locate(&self, comment_id: u64) -> UiResult<u64> {
        self.sections
            .values()
            .find(|board| board.get(comment_id).is_ok())
            .map(CommentBoard::post_id)
            .ok_or_else(|| DomainError::not_found("Comment", comment_id).into())
    }

    pub fn find(&self, comment_id: u64) -> UiResult<&Comment> {
        let post_id = self.locate(comment_id)?;
        Ok(self.section(post_id)?.get(comment_id)?)
    }

    /// Highest comment id handed out by any section.
    pub fn max_id(&self) -> u64 {
        self.sections
            .values()
            .map(CommentBoard::max_id)
            .max()
            .unwrap_or(0)
    }

    /// Keep every section from reusing an id up to `floor` or one held by
    /// another section.
    fn reserve(&mut self, floor: u64) {
        let floor = floor.max(self.max_id());
        for board in self.sections.values_mut() {
            board.reserve_ids(floor);
        }
    }

    /// Threaded text plus the flat documented payload.
    pub fn threads(&self, post_id: u64, blinded: &BlindList) -> UiResult<(String, Vec<CommentInfo>)> {
        let board = self.section(post_id)?;
        let threads = board.threads();

        let infos: Vec<(CommentInfo, Vec<CommentInfo>)> = threads
            .iter()
            .map(|thread| {
                (
                    CommentInfo::from(thread.root),
                    thread.replies.iter().map(|r| CommentInfo::from(*r)).collect(),
                )
            })
            .collect();
        fn line<'a>(info: &'a CommentInfo, comment: &Comment, blinded: &BlindList) -> CommentLine<'a> {
            CommentLine {
                info,
                liked: comment.likes.liked,
                hidden: blinded.is_blinded(ContentRef::comment(comment.id)),
            }
        }

        let lines: Vec<(CommentLine<'_>, Vec<CommentLine<'_>>)> = threads
            .iter()
            .zip(&infos)
            .map(|(thread, (root, replies))| {
                (
                    line(root, thread.root, blinded),
                    thread
                        .replies
                        .iter()
                        .zip(replies)
                        .map(|(comment, info)| line(info, comment, blinded))
                        .collect(),
                )
            })
            .collect();
        let text = render::comment_threads(&lines);

        let flat = infos
            .into_iter()
            .flat_map(|(root, replies)| std::iter::once(root).chain(replies))
            .collect();
        Ok((text, flat))
    }

    pub fn list(&self, post_id: u64, blinded: &BlindList) -> UiResult<Reply> {
        let (text, comments) = self.threads(post_id, blinded)?;
        Ok(Reply::view(text, &comments)?.sent(Endpoint::CommentsList, &[post_id]))
    }

    /// Write a comment, or a reply when `parent_id` is set. `floor` is the
    /// highest comment id held outside the sections, e.g. in the trash.
    pub fn submit(
        &mut self,
        post_id: u64,
        parent_id: Option<u64>,
        author: Author,
        text: &str,
        is_secret: bool,
        floor: u64,
        now: NaiveDateTime,
    ) -> UiResult<Reply> {
        self.section(post_id)?;
        self.reserve(floor);

        let board = self.section_mut(post_id)?;
        let comment = match parent_id {
            None => board.post(author, text, is_secret, now)?,
            Some(parent_id) => board.reply(parent_id, author, text, is_secret, now)?,
        };
        let request = CreateCommentRequest {
            content: comment.content.clone(),
            parent_id,
            is_secret,
        };
        let created = CreatedComment {
            comment_id: comment.id,
        };
        tracing::info!(post_id, comment_id = created.comment_id, reply = parent_id.is_some(), "Comment written");

        let message = if parent_id.is_some() {
            "Reply posted."
        } else {
            "Comment posted."
        };
        Reply::done(message)
            .with_data(&created)?
            .sent_with(Endpoint::CommentCreate, &[post_id], &request)
    }

    pub fn edit(&mut self, comment_id: u64, text: &str) -> UiResult<Reply> {
        let post_id = self.locate(comment_id)?;
        let comment = self.section_mut(post_id)?.edit(comment_id, text)?;
        let body = json!({ "content": comment.content });
        Reply::done("Comment updated.").sent_with(Endpoint::CommentUpdate, &[comment_id], &body)
    }

    /// Remove a comment and its replies. Returns the post they belonged to
    /// and the removed comments, the target first.
    pub fn delete(&mut self, comment_id: u64) -> UiResult<(u64, Vec<Comment>)> {
        let post_id = self.locate(comment_id)?;
        let removed = self.section_mut(post_id)?.delete(comment_id)?;
        tracing::info!(post_id, comment_id, removed = removed.len(), "Comment deleted");
        Ok((post_id, removed))
    }

    pub fn like(&mut self, comment_id: u64) -> UiResult<Reply> {
        let post_id = self.locate(comment_id)?;
        let likes = self.section_mut(post_id)?.toggle_like(comment_id)?;
        let message = if likes.liked {
            "Liked the comment."
        } else {
            "Like removed."
        };
        Ok(Reply::done(message)
            .with_text(format!("♥ {}", likes.count))
            .sent(Endpoint::CommentLike, &[comment_id]))
    }

    /// Put a comment back into its post's section.
    pub fn restore(&mut self, comment: Comment) -> UiResult<u64> {
        let post_id = comment.post_id;
        self.section_mut(post_id)?.restore(comment)?;
        Ok(post_id)
    }
}
