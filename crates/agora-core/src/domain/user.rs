use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult, require};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An active suspension. `until == None` means permanent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanState {
    pub reason: String,
    pub until: Option<NaiveDateTime>,
}

impl BanState {
    /// Whether the ban still applies at `now`.
    pub fn is_active(&self, now: NaiveDateTime) -> bool {
        self.until.is_none_or(|until| until > now)
    }
}

/// User entity as the admin screens see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub nickname: String,
    pub email: String,
    pub role: Role,
    pub ban: Option<BanState>,
    pub created_at: NaiveDateTime,
    pub post_count: u32,
    pub comment_count: u32,
}

impl User {
    pub fn is_banned(&self) -> bool {
        self.ban.is_some()
    }

    /// Like [`User::is_banned`], but a ban that has run out does not count.
    pub fn is_banned_at(&self, now: NaiveDateTime) -> bool {
        self.ban.as_ref().is_some_and(|ban| ban.is_active(now))
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Choices offered by the ban dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BanDuration {
    Days(u32),
    Permanent,
}

impl BanDuration {
    pub const DAY_OPTIONS: [u32; 4] = [1, 3, 7, 30];

    pub fn until(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            BanDuration::Days(days) => Some(now + Duration::days(i64::from(*days))),
            BanDuration::Permanent => None,
        }
    }
}

impl Default for BanDuration {
    fn default() -> Self {
        BanDuration::Days(7)
    }
}

impl fmt::Display for BanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BanDuration::Days(1) => f.write_str("1 day"),
            BanDuration::Days(days) => write!(f, "{days} days"),
            BanDuration::Permanent => f.write_str("permanent"),
        }
    }
}

impl FromStr for BanDuration {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("permanent") {
            return Ok(BanDuration::Permanent);
        }
        s.parse::<u32>()
            .ok()
            .filter(|days| Self::DAY_OPTIONS.contains(days))
            .map(BanDuration::Days)
            .ok_or_else(|| {
                DomainError::Validation(format!(
                    "ban duration must be one of 1, 3, 7, 30 or permanent (got `{s}`)"
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserFilter {
    #[default]
    All,
    Admins,
    Users,
    Banned,
}

impl UserFilter {
    pub fn admits(&self, user: &User) -> bool {
        match self {
            UserFilter::All => true,
            UserFilter::Admins => user.role == Role::Admin,
            UserFilter::Users => user.role == Role::User,
            UserFilter::Banned => user.is_banned(),
        }
    }
}

impl FromStr for UserFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(UserFilter::All),
            "admins" | "admin" => Ok(UserFilter::Admins),
            "users" | "user" => Ok(UserFilter::Users),
            "banned" => Ok(UserFilter::Banned),
            other => Err(DomainError::Validation(format!(
                "unknown user filter `{other}`"
            ))),
        }
    }
}

/// The admin user table.
#[derive(Debug, Clone, Default)]
pub struct UserRoster {
    users: Vec<User>,
}

impl UserRoster {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, id: u64) -> DomainResult<&User> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or(DomainError::not_found("User", id))
    }

    fn get_mut(&mut self, id: u64) -> DomainResult<&mut User> {
        self.users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(DomainError::not_found("User", id))
    }

    /// `term` matches username, nickname or email.
    pub fn list(&self, filter: UserFilter, term: Option<&str>) -> Vec<&User> {
        let term = term.map(str::to_lowercase);
        self.users
            .iter()
            .filter(|u| filter.admits(u))
            .filter(|u| {
                term.as_deref()
                    .map(|t| {
                        u.username.to_lowercase().contains(t)
                            || u.nickname.to_lowercase().contains(t)
                            || u.email.to_lowercase().contains(t)
                    })
                    .unwrap_or(true)
            })
            .collect()
    }

    pub fn ban(
        &mut self,
        id: u64,
        reason: &str,
        duration: BanDuration,
        now: NaiveDateTime,
    ) -> DomainResult<&User> {
        let reason = require(reason, "Please enter a reason for the ban.")?;
        let user = self.get_mut(id)?;

        if user.is_admin() {
            return Err(DomainError::Forbidden(
                "Administrators cannot be banned.".to_string(),
            ));
        }
        if user.is_banned_at(now) {
            return Err(DomainError::Conflict(format!(
                "{} is already banned.",
                user.username
            )));
        }

        user.ban = Some(BanState {
            reason,
            until: duration.until(now),
        });
        tracing::debug!(user_id = id, %duration, "user banned");
        Ok(user)
    }

    /// Lift a ban. A ban that already ran out is cleared, but still reported
    /// as a conflict.
    pub fn unban(&mut self, id: u64, now: NaiveDateTime) -> DomainResult<&User> {
        let user = self.get_mut(id)?;
        let active = user.ban.take().is_some_and(|ban| ban.is_active(now));
        if !active {
            return Err(DomainError::Conflict(format!(
                "{} is not banned.",
                user.username
            )));
        }
        tracing::debug!(user_id = id, "user unbanned");
        Ok(user)
    }

    /// Clear bans whose end date has passed. Returns how many were lifted.
    pub fn lift_expired(&mut self, now: NaiveDateTime) -> usize {
        let mut lifted = 0;
        for user in &mut self.users {
            let expired = user.ban.as_ref().is_some_and(|ban| !ban.is_active(now));
            if expired {
                user.ban = None;
                lifted += 1;
            }
        }
        lifted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, month, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn user(id: u64, username: &str, role: Role, ban: Option<BanState>) -> User {
        User {
            id,
            username: username.to_string(),
            nickname: username.to_uppercase(),
            email: format!("{username}@example.com"),
            role,
            ban,
            created_at: at(1, 15),
            post_count: 1,
            comment_count: 2,
        }
    }

    fn roster() -> UserRoster {
        UserRoster::new(vec![
            user(1, "johndoe", Role::User, None),
            user(3, "admin", Role::Admin, None),
            user(
                4,
                "banneduser",
                Role::User,
                Some(BanState {
                    reason: "guideline violation".to_string(),
                    until: Some(at(6, 30)),
                }),
            ),
        ])
    }

    #[test]
    fn ban_sets_reason_and_end_date() {
        let mut roster = roster();
        let user = roster
            .ban(1, " spam ", BanDuration::Days(7), at(5, 1))
            .unwrap();
        let ban = user.ban.as_ref().unwrap();
        assert_eq!(ban.reason, "spam");
        assert_eq!(ban.until, Some(at(5, 8)));
    }

    #[test]
    fn ban_without_reason_changes_nothing() {
        let mut roster = roster();
        assert_eq!(
            roster.ban(1, "", BanDuration::Permanent, at(5, 1)),
            Err(DomainError::MissingField("Please enter a reason for the ban."))
        );
        assert!(!roster.get(1).unwrap().is_banned());
    }

    #[test]
    fn admins_and_banned_users_cannot_be_banned() {
        let mut roster = roster();
        assert!(matches!(
            roster.ban(3, "x", BanDuration::Permanent, at(5, 1)),
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            roster.ban(4, "x", BanDuration::Permanent, at(5, 1)),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn unban_only_for_banned_users() {
        let mut roster = roster();
        assert!(!roster.unban(4, at(5, 1)).unwrap().is_banned());
        assert!(matches!(roster.unban(4, at(5, 1)), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn an_expired_ban_counts_as_no_ban() {
        let mut lapsed = roster();
        let mut rebanned = roster();
        assert!(lapsed.get(4).unwrap().is_banned_at(at(6, 29)));
        assert!(!lapsed.get(4).unwrap().is_banned_at(at(7, 1)));

        assert!(matches!(lapsed.unban(4, at(7, 1)), Err(DomainError::Conflict(_))));
        assert!(!lapsed.get(4).unwrap().is_banned());

        let user = rebanned
            .ban(4, "back again", BanDuration::Days(7), at(7, 1))
            .unwrap();
        let ban = user.ban.as_ref().unwrap();
        assert_eq!(ban.reason, "back again");
        assert_eq!(ban.until, Some(at(7, 8)));
    }

    #[test]
    fn filters_and_search() {
        let roster = roster();
        assert_eq!(roster.list(UserFilter::Banned, None)[0].id, 4);
        assert_eq!(roster.list(UserFilter::Admins, None)[0].id, 3);
        assert_eq!(roster.list(UserFilter::Users, None).len(), 2);
        assert_eq!(roster.list(UserFilter::All, Some("JOHN")).len(), 1);
    }

    #[test]
    fn expired_bans_are_lifted() {
        let mut roster = roster();
        assert_eq!(roster.lift_expired(at(6, 29)), 0);
        assert_eq!(roster.lift_expired(at(7, 1)), 1);
        assert!(!roster.get(4).unwrap().is_banned());
    }

    #[test]
    fn durations_parse_from_dialog_values() {
        assert_eq!("30".parse::<BanDuration>().unwrap(), BanDuration::Days(30));
        assert_eq!(
            "permanent".parse::<BanDuration>().unwrap(),
            BanDuration::Permanent
        );
        assert!("5".parse::<BanDuration>().is_err());
        assert_eq!(BanDuration::default(), BanDuration::Days(7));
    }
}
