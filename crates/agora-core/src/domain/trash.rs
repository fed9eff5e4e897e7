use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::target::{ContentKind, ContentRef};
use crate::error::{DomainError, DomainResult};

/// Something the viewer deleted and can still restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrashedItem {
    pub target: ContentRef,
    /// Post title or comment content.
    pub title: String,
    pub created_at: NaiveDateTime,
    pub deleted_at: NaiveDateTime,
}

/// The "my trash" page.
#[derive(Debug, Clone, Default)]
pub struct Trash {
    items: Vec<TrashedItem>,
}

impl Trash {
    pub fn new(items: Vec<TrashedItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn list(&self, kind: ContentKind) -> Vec<&TrashedItem> {
        self.items.iter().filter(|i| i.target.kind == kind).collect()
    }

    pub fn put(&mut self, item: TrashedItem) {
        self.items.retain(|i| i.target != item.target);
        self.items.push(item);
    }

    fn take(&mut self, target: ContentRef) -> DomainResult<TrashedItem> {
        let index = self
            .items
            .iter()
            .position(|i| i.target == target)
            .ok_or(DomainError::not_found(
                match target.kind {
                    ContentKind::Post => "Deleted post",
                    ContentKind::Comment => "Deleted comment",
                },
                target.id,
            ))?;
        Ok(self.items.remove(index))
    }

    /// Take an item out of the trash so it can go back where it came from.
    pub fn restore(&mut self, target: ContentRef) -> DomainResult<TrashedItem> {
        self.take(target)
    }

    /// Delete for good.
    pub fn purge(&mut self, target: ContentRef) -> DomainResult<TrashedItem> {
        self.take(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, day)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn trash() -> Trash {
        Trash::new(vec![
            TrashedItem {
                target: ContentRef::post(1),
                title: "deleted post 1".to_string(),
                created_at: at(10),
                deleted_at: at(15),
            },
            TrashedItem {
                target: ContentRef::comment(1),
                title: "deleted comment".to_string(),
                created_at: at(12),
                deleted_at: at(16),
            },
        ])
    }

    #[test]
    fn restore_and_purge_remove_the_item() {
        let mut trash = trash();
        assert_eq!(trash.list(ContentKind::Post).len(), 1);

        let restored = trash.restore(ContentRef::post(1)).unwrap();
        assert_eq!(restored.title, "deleted post 1");
        assert!(trash.list(ContentKind::Post).is_empty());

        trash.purge(ContentRef::comment(1)).unwrap();
        assert!(trash.is_empty());
        assert!(trash.purge(ContentRef::comment(1)).is_err());
    }

    #[test]
    fn put_replaces_same_target() {
        let mut trash = trash();
        trash.put(TrashedItem {
            target: ContentRef::post(1),
            title: "again".to_string(),
            created_at: at(10),
            deleted_at: at(20),
        });
        assert_eq!(trash.len(), 2);
        assert_eq!(trash.list(ContentKind::Post)[0].title, "again");
    }
}
