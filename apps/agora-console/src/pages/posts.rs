//! Post listing (home tabs, sorting, search, paging) and post detail.

use agora_core::DomainError;
use agora_core::domain::{
    BlindList, ContentRef, FeedKind, Post, PostBoard, PostQuery, PostSort, paginate,
};
use agora_shared::Endpoint;
use agora_shared::dto::{HomeFeed, PostDetail, PostSummary};

use crate::commands::ListArgs;
use crate::error::UiResult;
use crate::render;
use crate::reply::Reply;

pub struct PostsPage {
    board: PostBoard,
    feed: FeedKind,
    sort: PostSort,
    query: PostQuery,
    page: usize,
    size: usize,
}

impl PostsPage {
    pub fn new(posts: Vec<Post>, size: usize) -> Self {
        Self {
            board: PostBoard::new(posts),
            feed: FeedKind::default(),
            sort: PostSort::default(),
            query: PostQuery::default(),
            page: 1,
            size: size.max(1),
        }
    }

    pub fn board(&self) -> &PostBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut PostBoard {
        &mut self.board
    }

    fn apply(&mut self, args: &ListArgs) -> UiResult<()> {
        if args.page == Some(0) || args.size == Some(0) {
            return Err(
                DomainError::Validation("page and size must be at least 1".to_string()).into(),
            );
        }
        let blank = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        if args.clear {
            self.query = PostQuery::default();
            self.page = 1;
        }
        if args.category.is_some() || args.title.is_some() || args.author.is_some() {
            self.query = PostQuery {
                category: blank(&args.category),
                title: blank(&args.title),
                author: blank(&args.author),
            };
            self.page = 1;
        }
        if let Some(feed) = args.feed {
            self.feed = feed;
            self.page = 1;
        }
        if let Some(sort) = args.sort {
            self.sort = sort;
        }
        if let Some(size) = args.size {
            self.size = size;
        }
        if let Some(page) = args.page {
            self.page = page;
        }
        Ok(())
    }

    /// The current tab, blinded posts left out.
    pub fn list(&mut self, args: &ListArgs, blinded: &BlindList) -> UiResult<Reply> {
        self.apply(args)?;

        let posts: Vec<&Post> = self
            .board
            .feed(self.feed, self.sort, &self.query)
            .into_iter()
            .filter(|p| !blinded.is_blinded(ContentRef::post(p.id)))
            .collect();
        let pinned: Vec<u64> = posts.iter().filter(|p| p.is_pinned).map(|p| p.id).collect();
        let page = paginate(posts, self.page, self.size)?.map(PostSummary::from);

        tracing::debug!(
            feed = ?self.feed,
            sort = ?self.sort,
            search = !self.query.is_empty(),
            page = page.current_page,
            total = page.total_count,
            "Post listing rendered"
        );

        let endpoint = if self.query.is_empty() {
            Endpoint::PostsList
        } else {
            Endpoint::PostsSearch
        };
        Ok(Reply::view(render::post_page(&page, &pinned), &page)?.sent(endpoint, &[]))
    }

    pub fn home(&self, blinded: &BlindList) -> UiResult<Reply> {
        let feed: HomeFeed = self
            .board
            .feed(FeedKind::All, PostSort::Latest, &PostQuery::default())
            .into_iter()
            .filter(|p| !blinded.is_blinded(ContentRef::post(p.id)))
            .collect();
        Reply::view(render::home(&feed), &feed)
    }

    /// Open a post for reading. Counts a view.
    pub fn open(&mut self, post_id: u64, blinded: &BlindList) -> UiResult<&Post> {
        if blinded.is_blinded(ContentRef::post(post_id)) {
            self.board.get(post_id)?;
            return Err(DomainError::Forbidden(
                "This post has been blinded by a moderator.".to_string(),
            )
            .into());
        }
        self.board.record_view(post_id)?;
        Ok(self.board.get(post_id)?)
    }

    pub fn detail(post: &Post, comments: &str) -> UiResult<Reply> {
        let detail = PostDetail::from(post);
        Ok(Reply::view(
            render::post_detail(&detail, post.likes.liked, comments),
            &detail,
        )?
        .sent(Endpoint::PostDetail, &[post.id]))
    }

    pub fn like(&mut self, post_id: u64) -> UiResult<Reply> {
        let likes = self.board.toggle_like(post_id)?;
        let message = if likes.liked {
            "Liked the post."
        } else {
            "Like removed."
        };
        Ok(Reply::done(message)
            .with_text(format!("♥ {}", likes.count))
            .sent(Endpoint::PostLike, &[post_id]))
    }

    pub fn download(&self, post_id: u64, file_id: u64) -> UiResult<Reply> {
        let post = self.board.get(post_id)?;
        let file = post.attachment(file_id)?;
        tracing::info!(post_id, file_id, name = %file.name, "Attachment download requested");
        Ok(Reply::done(format!("Downloading {} ({}).", file.name, file.size))
            .sent(Endpoint::FileDownload, &[file_id]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::domain::{Author, BlindedItem, Likes};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn post(id: u64, likes: u32, notice: bool, pinned: bool) -> Post {
        Post {
            id,
            title: format!("post {id}"),
            content: "body".to_string(),
            author: Author::new(101, "Hong Gildong"),
            category: "Free Board".to_string(),
            created_at: at(id as u32),
            view_count: 0,
            likes: Likes::new(likes, false),
            comment_count: 0,
            is_notice: notice,
            is_pinned: pinned,
            tags: Vec::new(),
            files: Vec::new(),
        }
    }

    fn page() -> PostsPage {
        PostsPage::new(
            vec![
                post(1, 0, true, true),
                post(2, 9, false, false),
                post(3, 6, false, false),
                post(4, 1, true, false),
            ],
            20,
        )
    }

    fn listed(reply: &Reply) -> Vec<u64> {
        reply.data.as_ref().unwrap()["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["post_id"].as_u64().unwrap())
            .collect()
    }

    #[test]
    fn notice_tab_puts_pinned_first() {
        let mut page = page();
        let args = ListArgs {
            feed: Some(FeedKind::Notice),
            ..Default::default()
        };
        let reply = page.list(&args, &BlindList::default()).unwrap();
        assert_eq!(listed(&reply), vec![1, 4]);
    }

    #[test]
    fn popular_tab_keeps_posts_over_five_likes() {
        let mut page = page();
        let args = ListArgs {
            feed: Some(FeedKind::Popular),
            ..Default::default()
        };
        let reply = page.list(&args, &BlindList::default()).unwrap();
        assert_eq!(listed(&reply), vec![3, 2]);
    }

    #[test]
    fn listing_state_sticks_between_calls() {
        let mut page = page();
        let blinded = BlindList::default();
        page.list(
            &ListArgs {
                title: Some("post 2".to_string()),
                ..Default::default()
            },
            &blinded,
        )
        .unwrap();
        let reply = page.list(&ListArgs::default(), &blinded).unwrap();
        assert_eq!(listed(&reply), vec![2]);
        assert_eq!(reply.request.unwrap().endpoint, Endpoint::PostsSearch);

        let reply = page
            .list(
                &ListArgs {
                    clear: true,
                    ..Default::default()
                },
                &blinded,
            )
            .unwrap();
        assert_eq!(listed(&reply).len(), 4);
    }

    #[test]
    fn blinded_posts_are_hidden_and_locked() {
        let mut page = page();
        let blinded = BlindList::new(vec![BlindedItem {
            target: ContentRef::post(2),
            snippet: "post 2".to_string(),
            author_id: 101,
            reason: "spam".to_string(),
            created_at: at(10),
        }]);
        let reply = page.list(&ListArgs::default(), &blinded).unwrap();
        assert!(!listed(&reply).contains(&2));
        assert!(page.open(2, &blinded).is_err());
        assert_eq!(page.board().get(2).unwrap().view_count, 0);
    }

    #[test]
    fn opening_counts_a_view() {
        let mut page = page();
        let post = page.open(3, &BlindList::default()).unwrap();
        assert_eq!(post.view_count, 1);
    }

    #[test]
    fn like_twice_restores_the_counter() {
        let mut page = page();
        let reply = page.like(2).unwrap();
        assert_eq!(reply.toast.as_deref(), Some("Liked the post."));
        assert_eq!(page.board().get(2).unwrap().likes, Likes::new(10, true));

        let reply = page.like(2).unwrap();
        assert_eq!(reply.toast.as_deref(), Some("Like removed."));
        assert_eq!(page.board().get(2).unwrap().likes, Likes::new(9, false));
    }

    #[test]
    fn zero_page_is_rejected() {
        let mut page = page();
        let args = ListArgs {
            page: Some(0),
            ..Default::default()
        };
        assert!(page.list(&args, &BlindList::default()).is_err());
        assert!(page.list(&ListArgs::default(), &BlindList::default()).is_ok());
    }
}
