use chrono::NaiveDateTime;

use agora_core::domain::{BanDuration, User, UserFilter, UserRoster};
use agora_shared::Endpoint;
use agora_shared::dto::{AdminUserInfo, BanRequest, UserInfo};

use crate::error::UiResult;
use crate::render;
use crate::reply::Reply;

pub struct UsersPage {
    roster: UserRoster,
}

impl UsersPage {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            roster: UserRoster::new(users),
        }
    }

    pub fn roster(&self) -> &UserRoster {
        &self.roster
    }

    /// The user table. Bans that ran out by `now` are lifted first.
    pub fn list(
        &mut self,
        filter: UserFilter,
        search: Option<&str>,
        now: NaiveDateTime,
    ) -> UiResult<Reply> {
        let lifted = self.roster.lift_expired(now);
        if lifted > 0 {
            tracing::info!(lifted, "Expired bans lifted");
        }

        let users: Vec<AdminUserInfo> = self
            .roster
            .list(filter, search)
            .into_iter()
            .map(AdminUserInfo::from)
            .collect();
        Ok(Reply::view(render::users(&users), &users)?.sent(Endpoint::AdminUsersList, &[]))
    }

    pub fn ban(
        &mut self,
        user_id: u64,
        reason: &str,
        duration: BanDuration,
        now: NaiveDateTime,
    ) -> UiResult<Reply> {
        let user = self.roster.ban(user_id, reason, duration, now)?;
        let request = BanRequest::new(reason.trim(), duration);
        tracing::info!(user_id, %duration, "User banned");

        Reply::done("User banned.")
            .with_text(format!("{} has been banned ({duration}).", user.nickname))
            .with_data(&UserInfo::from(user))?
            .sent_with(Endpoint::UserBan, &[user_id], &request)
    }

    pub fn unban(&mut self, user_id: u64, now: NaiveDateTime) -> UiResult<Reply> {
        let user = self.roster.unban(user_id, now)?;
        tracing::info!(user_id, "User unbanned");
        Ok(Reply::done("User unbanned.")
            .with_data(&UserInfo::from(user))?
            .sent(Endpoint::UserUnban, &[user_id]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::domain::{BanState, Role};
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 21)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn user(id: u64, role: Role, ban: Option<BanState>) -> User {
        User {
            id,
            username: format!("user{id}"),
            nickname: format!("Nick {id}"),
            email: format!("user{id}@example.com"),
            role,
            ban,
            created_at: now() - Duration::days(100),
            post_count: 3,
            comment_count: 8,
        }
    }

    fn page() -> UsersPage {
        UsersPage::new(vec![
            user(1, Role::Admin, None),
            user(2, Role::User, None),
            user(
                3,
                Role::User,
                Some(BanState {
                    reason: "spam".to_string(),
                    until: Some(now() - Duration::days(1)),
                }),
            ),
        ])
    }

    #[test]
    fn ban_requires_reason_and_spares_admins() {
        let mut page = page();
        assert!(page.ban(2, "  ", BanDuration::default(), now()).is_err());
        assert!(!page.roster().get(2).unwrap().is_banned());
        assert!(page.ban(1, "rude", BanDuration::Permanent, now()).is_err());

        let reply = page.ban(2, "rude", BanDuration::default(), now()).unwrap();
        assert_eq!(reply.toast.as_deref(), Some("User banned."));
        assert_eq!(reply.text, "Nick 2 has been banned (7 days).");
        let body = reply.request.unwrap().body.unwrap();
        assert_eq!(body["duration_days"], 7);
        assert!(page.ban(2, "again", BanDuration::default(), now()).is_err());
    }

    #[test]
    fn expired_bans_are_lifted_when_listing() {
        let mut page = page();
        let reply = page.list(UserFilter::Banned, None, now()).unwrap();
        assert!(reply.data.unwrap().as_array().unwrap().is_empty());
        assert!(page.unban(3, now()).is_err());
    }

    #[test]
    fn a_lapsed_ban_can_be_replaced_without_listing_first() {
        let mut page = page();
        assert!(page.unban(3, now()).is_err());

        let reply = page.ban(3, "spam again", BanDuration::Days(3), now()).unwrap();
        assert_eq!(reply.toast.as_deref(), Some("User banned."));
        let ban = page.roster().get(3).unwrap().ban.clone().unwrap();
        assert_eq!(ban.until, Some(now() + Duration::days(3)));
    }

    #[test]
    fn unban_restores_the_account() {
        let mut page = page();
        page.ban(2, "rude", BanDuration::Days(1), now()).unwrap();
        let reply = page.unban(2, now()).unwrap();
        assert_eq!(reply.data.unwrap()["is_banned"], false);
        assert_eq!(reply.request.unwrap().path, "/admin/users/2/ban");
    }
}
