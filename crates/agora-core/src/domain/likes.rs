use serde::{Deserialize, Serialize};

/// Like counter plus the viewer's own like flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Likes {
    pub count: u32,
    pub liked: bool,
}

impl Likes {
    pub fn new(count: u32, liked: bool) -> Self {
        Self { count, liked }
    }

    /// Flip the viewer's like. Returns `true` when the toggle added a like.
    pub fn toggle(&mut self) -> bool {
        if self.liked {
            self.liked = false;
            self.count = self.count.saturating_sub(1);
        } else {
            self.liked = true;
            self.count += 1;
        }
        self.liked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adjusts_count_by_one() {
        let mut likes = Likes::new(4, false);
        assert!(likes.toggle());
        assert_eq!(likes, Likes::new(5, true));
        assert!(!likes.toggle());
        assert_eq!(likes, Likes::new(4, false));
    }
}
