//! System settings form. Edits land in a draft; each section is saved on its
//! own, and only saved values affect the rest of the board.

use agora_core::domain::{SettingsSection, SystemSettings};
use agora_shared::Endpoint;

use crate::error::UiResult;
use crate::render;
use crate::reply::Reply;

pub struct SettingsPage {
    saved: SystemSettings,
    draft: SystemSettings,
    dirty: Vec<SettingsSection>,
}

impl SettingsPage {
    pub fn new(settings: SystemSettings) -> Self {
        Self {
            draft: settings.clone(),
            saved: settings,
            dirty: Vec::new(),
        }
    }

    /// Settings in effect.
    pub fn current(&self) -> &SystemSettings {
        &self.saved
    }

    pub fn show(&self) -> UiResult<Reply> {
        Ok(
            Reply::view(render::settings(&self.draft, &self.dirty), &self.draft)?
                .sent(Endpoint::SettingsGet, &[]),
        )
    }

    pub fn set(&mut self, key: &str, value: &str) -> UiResult<Reply> {
        let section = self.draft.apply(key, value)?;
        if !self.dirty.contains(&section) {
            self.dirty.push(section);
        }
        tracing::debug!(key, %section, "Setting changed");
        Ok(Reply::text(format!(
            "{key} updated. Run `admin settings save {section}` to keep it."
        )))
    }

    pub fn save(&mut self, section: SettingsSection) -> UiResult<Reply> {
        let body = match section {
            SettingsSection::General => {
                self.saved.general = self.draft.general.clone();
                serde_json::to_value(&self.saved.general)?
            }
            SettingsSection::Content => {
                self.saved.content = self.draft.content.clone();
                serde_json::to_value(&self.saved.content)?
            }
            SettingsSection::Security => {
                self.saved.security = self.draft.security.clone();
                serde_json::to_value(&self.saved.security)?
            }
            SettingsSection::Legal => {
                self.saved.legal = self.draft.legal.clone();
                serde_json::to_value(&self.saved.legal)?
            }
        };
        self.dirty.retain(|s| *s != section);
        tracing::info!(%section, "Settings saved");

        let message = match section {
            SettingsSection::General => "General settings saved.",
            SettingsSection::Content => "Content settings saved.",
            SettingsSection::Security => "Security settings saved.",
            SettingsSection::Legal => "Legal documents saved.",
        };
        let path = Endpoint::SettingsUpdate.info().path_for(&[section]);
        Reply::done(message).sent_to(Endpoint::SettingsUpdate, path, &body)
    }

    /// Drop every unsaved edit.
    pub fn discard(&mut self) -> Reply {
        self.draft = self.saved.clone();
        let dropped = std::mem::take(&mut self.dirty);
        Reply::text(format!("Discarded unsaved changes in {} section(s).", dropped.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_take_effect_only_once_saved() {
        let mut page = SettingsPage::new(SystemSettings::default());
        page.set("maintenance_mode", "on").unwrap();
        page.set("posts_per_page", "30").unwrap();
        assert!(!page.current().security.maintenance_mode);

        let reply = page.save(SettingsSection::Security).unwrap();
        assert_eq!(reply.toast.as_deref(), Some("Security settings saved."));
        let request = reply.request.unwrap();
        assert_eq!(request.path, "/admin/settings/security");
        assert_eq!(request.body.unwrap()["maintenance_mode"], true);
        assert!(page.current().security.maintenance_mode);
        assert_eq!(page.current().content.posts_per_page, 20);

        page.discard();
        page.save(SettingsSection::Content).unwrap();
        assert_eq!(page.current().content.posts_per_page, 20);
    }

    #[test]
    fn numbers_must_be_positive() {
        let mut page = SettingsPage::new(SystemSettings::default());
        assert!(page.set("auto_blind_threshold", "0").is_err());
        assert!(page.set("max_file_size", "-1").is_err());
        let shown = page.show().unwrap();
        assert!(!shown.text.contains("(unsaved)"));
    }
}
