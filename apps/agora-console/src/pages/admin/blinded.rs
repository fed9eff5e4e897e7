use chrono::NaiveDateTime;

use agora_core::domain::{BlindList, BlindedItem, ContentKind, ContentRef};
use agora_shared::Endpoint;
use agora_shared::dto::{BlindRequest, BlindedInfo};

use crate::error::UiResult;
use crate::render;
use crate::reply::Reply;

pub struct BlindPage {
    list: BlindList,
}

impl BlindPage {
    pub fn new(items: Vec<BlindedItem>) -> Self {
        Self {
            list: BlindList::new(items),
        }
    }

    /// What readers may not see.
    pub fn blinded(&self) -> &BlindList {
        &self.list
    }

    pub fn list(&self, kind: Option<ContentKind>) -> UiResult<Reply> {
        let kinds = match kind {
            Some(kind) => vec![kind],
            None => vec![ContentKind::Post, ContentKind::Comment],
        };
        let items: Vec<BlindedInfo> = kinds
            .into_iter()
            .flat_map(|kind| self.list.list(kind))
            .map(BlindedInfo::from)
            .collect();
        let endpoint = match kind {
            Some(ContentKind::Comment) => Endpoint::BlindedCommentsList,
            _ => Endpoint::BlindedPostsList,
        };
        Ok(Reply::view(render::blinded(&items), &items)?.sent(endpoint, &[]))
    }

    pub fn blind(
        &mut self,
        target: ContentRef,
        snippet: &str,
        author_id: u64,
        reason: &str,
        now: NaiveDateTime,
    ) -> UiResult<Reply> {
        let item = self.list.blind(target, snippet, author_id, reason, now)?;
        let request = BlindRequest {
            reason: item.reason.clone(),
        };
        tracing::info!(item = %target, reason = %item.reason, "Content blinded");

        let (message, endpoint) = match target.kind {
            ContentKind::Post => ("Post blinded.", Endpoint::PostBlind),
            ContentKind::Comment => ("Comment blinded.", Endpoint::CommentBlind),
        };
        Reply::done(message).sent_with(endpoint, &[target.id], &request)
    }

    pub fn unblind(&mut self, target: ContentRef) -> UiResult<Reply> {
        self.list.unblind(target)?;
        tracing::info!(item = %target, "Blind lifted");

        let (message, endpoint) = match target.kind {
            ContentKind::Post => ("Post blind lifted.", Endpoint::PostUnblind),
            ContentKind::Comment => ("Comment blind lifted.", Endpoint::CommentUnblind),
        };
        Ok(Reply::done(message).sent(endpoint, &[target.id]))
    }
}
