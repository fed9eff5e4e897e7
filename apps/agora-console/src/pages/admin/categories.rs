use chrono::NaiveDateTime;
use serde_json::json;

use agora_core::domain::{Category, CategoryBoard, CategoryDraft, MoveDirection};
use agora_shared::Endpoint;
use agora_shared::dto::CategoryInfo;

use crate::commands::{CategoryArgs, CategoryEdit};
use crate::error::UiResult;
use crate::render;
use crate::reply::Reply;

impl From<&CategoryArgs> for CategoryDraft {
    fn from(args: &CategoryArgs) -> Self {
        Self {
            name: args.name.clone(),
            description: args.description.clone(),
            is_visible: !args.hidden,
        }
    }
}

impl CategoryEdit {
    /// The edit form opens on the current values; only supplied fields change.
    fn merged(&self, current: &Category) -> CategoryDraft {
        CategoryDraft {
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| current.description.clone()),
            is_visible: match (self.hidden, self.visible) {
                (true, _) => false,
                (_, true) => true,
                _ => current.is_visible,
            },
        }
    }
}

fn body(draft: &CategoryDraft) -> serde_json::Value {
    json!({
        "name": draft.name.trim(),
        "description": draft.description.trim(),
        "is_visible": draft.is_visible,
    })
}

pub struct CategoriesPage {
    board: CategoryBoard,
}

impl CategoriesPage {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            board: CategoryBoard::new(categories),
        }
    }

    pub fn board(&self) -> &CategoryBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut CategoryBoard {
        &mut self.board
    }

    pub fn list(&self) -> UiResult<Reply> {
        let categories: Vec<CategoryInfo> = self.board.all().iter().map(CategoryInfo::from).collect();
        Ok(Reply::view(render::categories(&categories), &categories)?
            .sent(Endpoint::CategoriesList, &[]))
    }

    pub fn add(&mut self, args: &CategoryArgs, now: NaiveDateTime) -> UiResult<Reply> {
        let draft = CategoryDraft::from(args);
        let category = self.board.add(&draft, now)?;
        tracing::info!(category_id = category.id, name = %category.name, "Category added");
        Reply::done("Category added.")
            .with_data(&CategoryInfo::from(category))?
            .sent_with(Endpoint::CategoryCreate, &[], &body(&draft))
    }

    pub fn edit(&mut self, category_id: u64, fields: &CategoryEdit) -> UiResult<Reply> {
        let draft = fields.merged(self.board.get(category_id)?);
        let category = self.board.edit(category_id, &draft)?;
        tracing::info!(category_id, name = %category.name, "Category updated");
        Reply::done("Category updated.")
            .with_data(&CategoryInfo::from(category))?
            .sent_with(Endpoint::CategoryUpdate, &[category_id], &body(&draft))
    }

    pub fn delete(&mut self, category_id: u64) -> UiResult<Reply> {
        let removed = self.board.delete(category_id)?;
        tracing::info!(category_id, name = %removed.name, "Category deleted");
        Ok(Reply::done("Category deleted.").sent(Endpoint::CategoryDelete, &[category_id]))
    }

    /// Swap with the neighbour. At either end nothing happens and nothing is
    /// sent.
    pub fn move_category(&mut self, category_id: u64, direction: MoveDirection) -> UiResult<Reply> {
        if !self.board.move_category(category_id, direction)? {
            let end = match direction {
                MoveDirection::Up => "top",
                MoveDirection::Down => "bottom",
            };
            return Ok(Reply::text(format!("Category {category_id} is already at the {end}.")));
        }

        let (word, label) = match direction {
            MoveDirection::Up => ("up", "Category moved up."),
            MoveDirection::Down => ("down", "Category moved down."),
        };
        tracing::debug!(category_id, direction = word, "Category moved");
        Reply::done(label).sent_with(
            Endpoint::CategoryReorder,
            &[category_id],
            &json!({ "direction": word }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn args(name: &str) -> CategoryArgs {
        CategoryArgs {
            name: name.to_string(),
            description: String::new(),
            hidden: false,
        }
    }

    fn page() -> CategoriesPage {
        let category = |id: u64, name: &str, post_count: u32| Category {
            id,
            name: name.to_string(),
            description: String::new(),
            post_count,
            is_visible: true,
            order: id as u32,
            created_at: now(),
        };
        CategoriesPage::new(vec![
            category(1, "Notice", 4),
            category(2, "Free Board", 0),
            category(3, "Q&A", 1),
        ])
    }

    fn order(page: &CategoriesPage) -> Vec<u64> {
        page.board().all().iter().map(|c| c.id).collect()
    }

    #[test]
    fn moving_swaps_with_the_neighbour() {
        let mut page = page();
        let reply = page.move_category(2, MoveDirection::Up).unwrap();
        assert_eq!(reply.toast.as_deref(), Some("Category moved up."));
        assert_eq!(order(&page), vec![2, 1, 3]);

        let reply = page.move_category(2, MoveDirection::Up).unwrap();
        assert!(reply.toast.is_none());
        assert!(reply.request.is_none());
        assert_eq!(order(&page), vec![2, 1, 3]);
    }

    #[test]
    fn non_empty_categories_are_kept() {
        let mut page = page();
        assert!(page.delete(1).is_err());
        assert_eq!(page.board().len(), 3);
        page.delete(2).unwrap();
        assert_eq!(order(&page), vec![1, 3]);
        assert_eq!(page.board().get(3).unwrap().order, 2);
    }

    #[test]
    fn name_is_required_for_add_and_edit() {
        let mut page = page();
        assert!(page.add(&args("  "), now()).is_err());
        let blank = CategoryEdit {
            name: Some(String::new()),
            ..CategoryEdit::default()
        };
        assert!(page.edit(3, &blank).is_err());
        assert_eq!(page.board().get(3).unwrap().name, "Q&A");

        let reply = page
            .add(
                &CategoryArgs {
                    hidden: true,
                    ..args("Archive")
                },
                now(),
            )
            .unwrap();
        assert_eq!(reply.data.unwrap()["order"], 4);
        assert_eq!(reply.request.unwrap().body.unwrap()["is_visible"], false);
    }

    #[test]
    fn edit_keeps_fields_that_are_not_supplied() {
        let mut page = page();
        page.edit(
            2,
            &CategoryEdit {
                description: Some("Talk about anything".to_string()),
                ..CategoryEdit::default()
            },
        )
        .unwrap();

        let reply = page
            .edit(
                2,
                &CategoryEdit {
                    name: Some("Lounge".to_string()),
                    hidden: true,
                    ..CategoryEdit::default()
                },
            )
            .unwrap();
        let category = page.board().get(2).unwrap();
        assert_eq!(category.name, "Lounge");
        assert_eq!(category.description, "Talk about anything");
        assert!(!category.is_visible);
        let body = reply.request.unwrap().body.unwrap();
        assert_eq!(body["description"], "Talk about anything");
    }
}
