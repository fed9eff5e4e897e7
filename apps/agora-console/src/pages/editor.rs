//! Post editor: one draft at a time, published onto the post board.

use chrono::NaiveDateTime;

use agora_core::DomainError;
use agora_core::domain::{Author, CategoryBoard, PostBoard, PostDraft, SystemSettings};
use agora_shared::Endpoint;
use agora_shared::dto::{CreatePostRequest, CreatedPost, FileInfo};

use crate::commands::WriteCommand;
use crate::error::UiResult;
use crate::render;
use crate::reply::Reply;

#[derive(Default)]
pub struct EditorPage {
    draft: PostDraft,
}

impl EditorPage {
    pub fn show(&self) -> UiResult<Reply> {
        let request = CreatePostRequest::from(&self.draft);
        let files: Vec<FileInfo> = self.draft.files().iter().map(FileInfo::from).collect();
        Reply::view(render::draft(&request, &files), &request)
    }

    /// Every form command except `submit`.
    pub fn edit(&mut self, command: WriteCommand, settings: &SystemSettings) -> UiResult<Reply> {
        let draft = &mut self.draft;
        match command {
            WriteCommand::Show | WriteCommand::Submit => {}
            WriteCommand::Title(text) => draft.title = text.joined(),
            WriteCommand::Content(text) => draft.content = text.joined(),
            WriteCommand::Category(text) => draft.category = text.joined(),
            WriteCommand::Notice { off } => draft.is_notice = !off,
            WriteCommand::Pinned { off } => draft.is_pinned = !off,
            WriteCommand::Tag(text) => {
                if !draft.add_tag(&text.joined()) {
                    tracing::debug!(tag = %text.joined(), "Blank or duplicate tag ignored");
                }
            }
            WriteCommand::Untag(text) => {
                draft.remove_tag(text.joined().trim());
            }
            WriteCommand::Attach { name, bytes } => return self.attach(&name, bytes, settings),
            WriteCommand::Detach { name } => {
                if !draft.detach(&name) {
                    return Err(
                        DomainError::Validation(format!("no attachment named `{name}`")).into(),
                    );
                }
            }
            WriteCommand::Reset => {
                *draft = PostDraft::default();
                return Ok(Reply::text("Draft discarded."));
            }
        }
        self.show()
    }

    fn attach(&mut self, name: &str, bytes: u64, settings: &SystemSettings) -> UiResult<Reply> {
        settings.check_upload(name, bytes)?;
        let file = FileInfo::from(self.draft.attach(name, bytes));
        tracing::debug!(name, bytes, "Attachment added to draft");
        let text = self.show()?.text;
        Ok(Reply::done(format!("Uploaded {}.", file.file_name))
            .with_data(&file)?
            .with_text(text)
            .sent(Endpoint::FileUpload, &[]))
    }

    /// Publish the draft. The category must be one readers can see.
    /// Returns the new post id with the reply.
    pub fn submit(
        &mut self,
        board: &mut PostBoard,
        categories: &mut CategoryBoard,
        author: Author,
        now: NaiveDateTime,
    ) -> UiResult<(u64, Reply)> {
        self.draft.validate()?;
        let category = self.draft.category.trim();
        if !categories.visible().any(|c| c.name == category) {
            return Err(DomainError::Validation(format!("unknown category `{category}`")).into());
        }

        let request = CreatePostRequest::from(&self.draft);
        let post = board.publish(&self.draft, author, now)?;
        let (post_id, category) = (post.id, post.category.clone());
        categories.adjust_post_count(&category, 1);
        self.draft = PostDraft::default();
        tracing::info!(post_id, category = %category, "Post published");

        let reply = Reply::done("Post published.")
            .with_data(&CreatedPost { post_id })?
            .sent_with(Endpoint::PostCreate, &[], &request)?;
        Ok((post_id, reply))
    }
}
