//! "My trash". Content deleted during the session is stashed here whole so a
//! restore puts back exactly what was removed. Rows seeded from the fixtures
//! carry only a title, so restoring them just clears the row.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use agora_core::domain::{
    Comment, CommentBoard, ContentKind, ContentRef, Post, Trash, TrashedItem,
};
use agora_shared::Endpoint;
use agora_shared::dto::TrashedInfo;

use crate::error::UiResult;
use crate::render;
use crate::reply::Reply;

/// What came back out of the trash.
#[derive(Debug)]
pub enum Stash {
    Post(Box<Post>, CommentBoard),
    Comment(Comment),
    Record,
}

pub struct TrashPage {
    trash: Trash,
    posts: HashMap<u64, (Post, CommentBoard)>,
    comments: HashMap<u64, Comment>,
}

impl TrashPage {
    pub fn new(items: Vec<TrashedItem>) -> Self {
        Self {
            trash: Trash::new(items),
            posts: HashMap::new(),
            comments: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.trash.len()
    }

    pub fn list(&self, kind: Option<ContentKind>) -> UiResult<Reply> {
        let kinds = match kind {
            Some(kind) => vec![kind],
            None => vec![ContentKind::Post, ContentKind::Comment],
        };
        let items: Vec<TrashedInfo> = kinds
            .into_iter()
            .flat_map(|kind| self.trash.list(kind))
            .map(TrashedInfo::from)
            .collect();
        let endpoint = match kind {
            Some(ContentKind::Comment) => Endpoint::TrashCommentsList,
            _ => Endpoint::TrashPostsList,
        };
        Ok(Reply::view(render::trash(&items), &items)?.sent(endpoint, &[]))
    }

    /// Highest post id the trash knows about.
    pub fn max_post_id(&self) -> u64 {
        self.trash
            .list(ContentKind::Post)
            .iter()
            .map(|item| item.target.id)
            .max()
            .unwrap_or(0)
    }

    /// Highest comment id the trash knows about, including the comments of
    /// stashed posts.
    pub fn max_comment_id(&self) -> u64 {
        let listed = self
            .trash
            .list(ContentKind::Comment)
            .into_iter()
            .map(|item| item.target.id);
        let stashed = self.posts.values().map(|(_, comments)| comments.max_id());
        listed.chain(stashed).max().unwrap_or(0)
    }

    pub fn stash_post(&mut self, post: Post, comments: CommentBoard, now: NaiveDateTime) {
        self.trash.put(TrashedItem {
            target: ContentRef::post(post.id),
            title: post.title.clone(),
            created_at: post.created_at,
            deleted_at: now,
        });
        self.posts.insert(post.id, (post, comments));
    }

    pub fn stash_comments(&mut self, comments: Vec<Comment>, now: NaiveDateTime) {
        for comment in comments {
            self.trash.put(TrashedItem {
                target: ContentRef::comment(comment.id),
                title: comment.content.clone(),
                created_at: comment.created_at,
                deleted_at: now,
            });
            self.comments.insert(comment.id, comment);
        }
    }

    pub fn stashed_comment(&self, comment_id: u64) -> Option<&Comment> {
        self.comments.get(&comment_id)
    }

    /// Take an item out for restoring.
    pub fn take(&mut self, target: ContentRef) -> UiResult<Stash> {
        self.trash.restore(target)?;
        let stash = match target.kind {
            ContentKind::Post => self
                .posts
                .remove(&target.id)
                .map(|(post, comments)| Stash::Post(Box::new(post), comments)),
            ContentKind::Comment => self.comments.remove(&target.id).map(Stash::Comment),
        };
        Ok(stash.unwrap_or(Stash::Record))
    }

    pub fn purge(&mut self, target: ContentRef) -> UiResult<Reply> {
        let item = self.trash.purge(target)?;
        match target.kind {
            ContentKind::Post => {
                self.posts.remove(&target.id);
            }
            ContentKind::Comment => {
                self.comments.remove(&target.id);
            }
        }
        tracing::info!(item = %target, title = %item.title, "Purged from trash");

        let (message, endpoint) = match target.kind {
            ContentKind::Post => ("Post permanently deleted.", Endpoint::TrashPostPurge),
            ContentKind::Comment => ("Comment permanently deleted.", Endpoint::TrashCommentPurge),
        };
        Ok(Reply::done(message).sent(endpoint, &[target.id]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::domain::{Author, Likes};
    use chrono::NaiveDate;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, day)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn post(id: u64) -> Post {
        Post {
            id,
            title: format!("post {id}"),
            content: "body".to_string(),
            author: Author::new(101, "Hong Gildong"),
            category: "Free Board".to_string(),
            created_at: at(1),
            view_count: 0,
            likes: Likes::default(),
            comment_count: 1,
            is_notice: false,
            is_pinned: false,
            tags: Vec::new(),
            files: Vec::new(),
        }
    }

    fn comment(id: u64, post_id: u64) -> Comment {
        Comment {
            id,
            post_id,
            content: format!("comment {id}"),
            author: Author::new(101, "Hong Gildong"),
            created_at: at(2),
            likes: Likes::default(),
            is_secret: false,
            parent_id: None,
        }
    }

    fn seeded() -> TrashPage {
        TrashPage::new(vec![TrashedItem {
            target: ContentRef::post(1),
            title: "Deleted post 1".to_string(),
            created_at: at(10),
            deleted_at: at(15),
        }])
    }

    #[test]
    fn stashed_post_comes_back_with_its_comments() {
        let mut page = seeded();
        page.stash_post(post(9), CommentBoard::new(9, vec![comment(40, 9)]), at(20));
        assert_eq!(page.len(), 2);
        assert_eq!(page.max_post_id(), 9);
        assert_eq!(page.max_comment_id(), 40);

        match page.take(ContentRef::post(9)).unwrap() {
            Stash::Post(post, comments) => {
                assert_eq!(post.id, 9);
                assert_eq!(comments.len(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(page.len(), 1);
    }

    #[test]
    fn seeded_rows_restore_as_records() {
        let mut page = seeded();
        assert!(matches!(page.take(ContentRef::post(1)).unwrap(), Stash::Record));
        assert_eq!(page.len(), 0);
        assert!(page.take(ContentRef::post(1)).is_err());
    }

    #[test]
    fn purge_forgets_the_stash() {
        let mut page = seeded();
        page.stash_comments(vec![comment(5, 1), comment(6, 1)], at(20));
        let reply = page.purge(ContentRef::comment(5)).unwrap();
        assert_eq!(reply.toast.as_deref(), Some("Comment permanently deleted."));
        assert!(page.stashed_comment(5).is_none());
        assert!(page.stashed_comment(6).is_some());

        let listed = page.list(Some(ContentKind::Comment)).unwrap().data.unwrap();
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["comment_id"], 6);
    }
}
