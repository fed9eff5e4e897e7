use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// One page of a listing, with the counters the documented list endpoints
/// return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub size: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            size: self.size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }
}

/// Cut `items` into pages of `size` and return the 1-based page `page`.
/// Pages past the end come back empty.
pub fn paginate<T>(items: Vec<T>, page: usize, size: usize) -> DomainResult<Page<T>> {
    if page == 0 || size == 0 {
        return Err(DomainError::Validation(
            "page and size must be at least 1".to_string(),
        ));
    }

    let total_count = items.len();
    let total_pages = total_count.div_ceil(size);
    // An offset past usize::MAX is past the end of any list.
    let items = match (page - 1).checked_mul(size) {
        Some(offset) => items.into_iter().skip(offset).take(size).collect(),
        None => Vec::new(),
    };

    Ok(Page {
        items,
        current_page: page,
        size,
        total_count,
        total_pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_requested_page() {
        let page = paginate((1..=45).collect::<Vec<_>>(), 3, 20).unwrap();
        assert_eq!(page.items, (41..=45).collect::<Vec<_>>());
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn rejects_zero_page() {
        assert!(paginate(vec![1], 0, 20).is_err());
        assert!(paginate(vec![1], 1, 0).is_err());
    }

    #[test]
    fn page_past_end_is_empty() {
        let page = paginate(vec![1, 2], 5, 20).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 2);
    }

    #[test]
    fn huge_page_number_is_empty() {
        let page = paginate(vec![1, 2, 3], usize::MAX, 2).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.current_page, usize::MAX);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.total_pages, 2);
        assert!(!page.has_next());
    }
}
