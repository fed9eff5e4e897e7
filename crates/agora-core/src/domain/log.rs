//! Admin log viewer records and filters.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

macro_rules! wire_enum {
    ($name:ident, $what:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_uppercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    other => Err(DomainError::Validation(format!(
                        concat!("unknown ", $what, " `{}`"),
                        other
                    ))),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

wire_enum!(LogLevel, "log level" {
    Debug => "DEBUG",
    Info => "INFO",
    Warn => "WARN",
    Error => "ERROR",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Login,
    Logout,
    PostCreate,
    PostDelete,
    CommentCreate,
    UserBan,
}

wire_enum!(ActionType, "action type" {
    Login => "LOGIN",
    Logout => "LOGOUT",
    PostCreate => "POST_CREATE",
    PostDelete => "POST_DELETE",
    CommentCreate => "COMMENT_CREATE",
    UserBan => "USER_BAN",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

wire_enum!(Severity, "severity" {
    Low => "LOW",
    Medium => "MEDIUM",
    High => "HIGH",
    Critical => "CRITICAL",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemLogEntry {
    pub id: u64,
    pub level: LogLevel,
    pub message: String,
    pub source: String,
    pub user_id: Option<u64>,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActionLog {
    pub id: u64,
    pub user_id: u64,
    pub username: String,
    pub action_type: ActionType,
    pub description: String,
    pub ip_address: String,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLog {
    pub id: u64,
    pub severity: Severity,
    pub error_code: String,
    pub message: String,
    pub timestamp: NaiveDateTime,
    pub resolved: bool,
}

/// Filter bar of the log viewer. Each tab only looks at the fields that apply
/// to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    pub level: Option<LogLevel>,
    pub action_type: Option<ActionType>,
    pub severity: Option<Severity>,
    pub search: Option<String>,
}

impl LogQuery {
    fn mentions(&self, fields: &[&str]) -> bool {
        match self.search.as_deref() {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                fields.iter().any(|f| f.to_lowercase().contains(&term))
            }
        }
    }

    pub fn admits_system(&self, entry: &SystemLogEntry) -> bool {
        self.level.map(|l| entry.level == l).unwrap_or(true)
            && self.mentions(&[entry.message.as_str(), entry.source.as_str()])
    }

    pub fn admits_action(&self, entry: &UserActionLog) -> bool {
        self.action_type
            .map(|a| entry.action_type == a)
            .unwrap_or(true)
            && self.mentions(&[
                entry.username.as_str(),
                entry.description.as_str(),
                entry.ip_address.as_str(),
            ])
    }

    pub fn admits_error(&self, entry: &ErrorLog) -> bool {
        self.severity.map(|s| entry.severity == s).unwrap_or(true)
            && self.mentions(&[entry.error_code.as_str(), entry.message.as_str()])
    }
}
