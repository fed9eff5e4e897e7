use std::cmp::Reverse;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::target::{ContentKind, ContentRef};
use crate::error::{DomainError, DomainResult, require};

/// A post or comment hidden from normal view by a moderator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindedItem {
    pub target: ContentRef,
    /// Post title or comment content.
    pub snippet: String,
    pub author_id: u64,
    pub reason: String,
    pub created_at: NaiveDateTime,
}

/// Everything currently blinded.
#[derive(Debug, Clone, Default)]
pub struct BlindList {
    items: Vec<BlindedItem>,
}

impl BlindList {
    pub fn new(items: Vec<BlindedItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_blinded(&self, target: ContentRef) -> bool {
        self.items.iter().any(|i| i.target == target)
    }

    /// Blinded items of one kind, most recently created first.
    pub fn list(&self, kind: ContentKind) -> Vec<&BlindedItem> {
        let mut items: Vec<&BlindedItem> = self
            .items
            .iter()
            .filter(|i| i.target.kind == kind)
            .collect();
        items.sort_by_key(|i| Reverse(i.created_at));
        items
    }

    pub fn blind(
        &mut self,
        target: ContentRef,
        snippet: impl Into<String>,
        author_id: u64,
        reason: &str,
        now: NaiveDateTime,
    ) -> DomainResult<&BlindedItem> {
        let reason = require(reason, "Please enter a reason for blinding.")?;
        if self.is_blinded(target) {
            return Err(DomainError::Conflict(format!("{target} is already blinded.")));
        }

        self.items.push(BlindedItem {
            target,
            snippet: snippet.into(),
            author_id,
            reason,
            created_at: now,
        });
        tracing::debug!(item = %target, "content blinded");
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn unblind(&mut self, target: ContentRef) -> DomainResult<BlindedItem> {
        let index = self
            .items
            .iter()
            .position(|i| i.target == target)
            .ok_or(DomainError::not_found(
                match target.kind {
                    ContentKind::Post => "Blinded post",
                    ContentKind::Comment => "Blinded comment",
                },
                target.id,
            ))?;
        tracing::debug!(item = %target, "content unblinded");
        Ok(self.items.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn blind_then_unblind() {
        let mut list = BlindList::default();
        list.blind(ContentRef::post(123), "title", 101, "abusive", now())
            .unwrap();
        assert!(list.is_blinded(ContentRef::post(123)));
        assert!(!list.is_blinded(ContentRef::comment(123)));
        assert_eq!(list.list(ContentKind::Post).len(), 1);

        let item = list.unblind(ContentRef::post(123)).unwrap();
        assert_eq!(item.reason, "abusive");
        assert!(list.is_empty());
    }

    #[test]
    fn blind_requires_reason_and_is_not_repeated() {
        let mut list = BlindList::default();
        assert!(list.blind(ContentRef::comment(5), "c", 1, " ", now()).is_err());
        assert!(list.is_empty());

        list.blind(ContentRef::comment(5), "c", 1, "spam", now()).unwrap();
        assert!(matches!(
            list.blind(ContentRef::comment(5), "c", 1, "spam", now()),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn unblind_unknown_target_fails() {
        let mut list = BlindList::default();
        assert_eq!(
            list.unblind(ContentRef::comment(9)),
            Err(DomainError::not_found("Blinded comment", 9))
        );
    }
}
