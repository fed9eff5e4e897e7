//! "My profile": loaded once through the [`ProfileSource`] port, then cached.

use agora_core::domain::User;
use agora_core::ports::ProfileSource;
use agora_shared::Endpoint;
use agora_shared::dto::UserInfo;

use crate::error::UiResult;
use crate::render;
use crate::reply::Reply;

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileView {
    NotLoaded,
    Loaded(User),
    Failed(String),
}

pub struct ProfilePage {
    user_id: String,
    view: ProfileView,
}

impl ProfilePage {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            view: ProfileView::NotLoaded,
        }
    }

    fn loaded(user: &User) -> UiResult<Reply> {
        let info = UserInfo::from(user);
        Ok(Reply::view(render::profile(&info), &info)?.sent(Endpoint::UserInfo, &[user.id]))
    }

    /// Show the profile, loading it on first use or when `retry` is set.
    /// A failed load sticks until retried.
    pub async fn show(&mut self, source: &dyn ProfileSource, retry: bool) -> UiResult<Reply> {
        match (&self.view, retry) {
            (ProfileView::Loaded(user), false) => return Self::loaded(user),
            (ProfileView::Failed(message), false) => {
                return Ok(Reply::text(format!(
                    "{message}\nRun `profile --retry` to try again."
                )));
            }
            _ => {}
        }

        tracing::debug!(user_id = %self.user_id, retry, "Loading profile");
        match source.user_info(&self.user_id).await {
            Ok(user) => {
                let reply = Self::loaded(&user)?;
                self.view = ProfileView::Loaded(user);
                Ok(reply)
            }
            Err(err) => {
                tracing::warn!(user_id = %self.user_id, error = %err, "Profile load failed");
                self.view = ProfileView::Failed(err.to_string());
                Err(err.into())
            }
        }
    }
}
