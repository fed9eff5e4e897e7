use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult, require};

/// Board category. `order` is 1-based and always matches the list position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub post_count: u32,
    pub is_visible: bool,
    pub order: u32,
    pub created_at: NaiveDateTime,
}

/// Add/edit dialog fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
    pub is_visible: bool,
}

impl Default for CategoryDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            is_visible: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl FromStr for MoveDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(MoveDirection::Up),
            "down" => Ok(MoveDirection::Down),
            other => Err(DomainError::Validation(format!(
                "direction must be `up` or `down` (got `{other}`)"
            ))),
        }
    }
}

/// Ordered category list of the admin "categories" tab.
#[derive(Debug, Clone, Default)]
pub struct CategoryBoard {
    categories: Vec<Category>,
}

impl CategoryBoard {
    /// Seed the board. Categories are sorted by their stored order and then
    /// renumbered so that `order` matches the position.
    pub fn new(mut categories: Vec<Category>) -> Self {
        categories.sort_by_key(|c| c.order);
        let mut board = Self { categories };
        board.renumber();
        board
    }

    fn renumber(&mut self) {
        for (index, category) in self.categories.iter_mut().enumerate() {
            category.order = index as u32 + 1;
        }
    }

    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// What the sidebar shows.
    pub fn visible(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| c.is_visible)
    }

    pub fn get(&self, id: u64) -> DomainResult<&Category> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .ok_or(DomainError::not_found("Category", id))
    }

    fn position(&self, id: u64) -> DomainResult<usize> {
        self.categories
            .iter()
            .position(|c| c.id == id)
            .ok_or(DomainError::not_found("Category", id))
    }

    pub fn add(&mut self, draft: &CategoryDraft, now: NaiveDateTime) -> DomainResult<&Category> {
        let name = require(&draft.name, "Please enter a category name.")?;
        if self.categories.iter().any(|c| c.name == name) {
            return Err(DomainError::Conflict(format!(
                "A category named `{name}` already exists."
            )));
        }

        let id = self.categories.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        self.categories.push(Category {
            id,
            name,
            description: draft.description.trim().to_string(),
            post_count: 0,
            is_visible: draft.is_visible,
            order: self.categories.len() as u32 + 1,
            created_at: now,
        });
        Ok(&self.categories[self.categories.len() - 1])
    }

    pub fn edit(&mut self, id: u64, draft: &CategoryDraft) -> DomainResult<&Category> {
        let name = require(&draft.name, "Please enter a category name.")?;
        let index = self.position(id)?;
        if self
            .categories
            .iter()
            .any(|c| c.id != id && c.name == name)
        {
            return Err(DomainError::Conflict(format!(
                "A category named `{name}` already exists."
            )));
        }

        let category = &mut self.categories[index];
        category.name = name;
        category.description = draft.description.trim().to_string();
        category.is_visible = draft.is_visible;
        Ok(category)
    }

    /// Delete an empty category. Categories that still hold posts stay put.
    pub fn delete(&mut self, id: u64) -> DomainResult<Category> {
        let index = self.position(id)?;
        let category = &self.categories[index];
        if category.post_count > 0 {
            return Err(DomainError::Forbidden(format!(
                "`{}` still has {} posts and cannot be deleted.",
                category.name, category.post_count
            )));
        }

        let removed = self.categories.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Swap a category with its neighbour. Returns `false` (and changes
    /// nothing) when it already sits at that end of the list.
    pub fn move_category(&mut self, id: u64, direction: MoveDirection) -> DomainResult<bool> {
        let index = self.position(id)?;
        let target = match direction {
            MoveDirection::Up if index == 0 => return Ok(false),
            MoveDirection::Down if index + 1 == self.categories.len() => return Ok(false),
            MoveDirection::Up => index - 1,
            MoveDirection::Down => index + 1,
        };

        self.categories.swap(index, target);
        self.renumber();
        Ok(true)
    }

    pub fn adjust_post_count(&mut self, name: &str, delta: i32) {
        if let Some(category) = self.categories.iter_mut().find(|c| c.name == name) {
            category.post_count = category.post_count.saturating_add_signed(delta);
        }
    }
}
