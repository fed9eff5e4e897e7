use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult, require};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralSettings {
    pub site_title: String,
    pub site_description: String,
    pub allow_registration: bool,
    pub require_email_verification: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSettings {
    pub allow_file_upload: bool,
    pub max_file_size_mb: u32,
    /// Lower-case extensions without the dot.
    pub allowed_file_types: Vec<String>,
    pub posts_per_page: u32,
    pub comments_per_page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecuritySettings {
    pub enable_reporting: bool,
    /// Pending reports after which content is blinded automatically.
    pub auto_blind_threshold: u32,
    pub maintenance_mode: bool,
    pub maintenance_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalSettings {
    pub footer_text: String,
    pub terms_of_service: String,
    pub privacy_policy: String,
}

/// Site-wide settings edited on the admin "settings" tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSettings {
    pub general: GeneralSettings,
    pub content: ContentSettings,
    pub security: SecuritySettings,
    pub legal: LegalSettings,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            general: GeneralSettings {
                site_title: "Board System".to_string(),
                site_description: "A modern discussion board".to_string(),
                allow_registration: true,
                require_email_verification: true,
            },
            content: ContentSettings {
                allow_file_upload: true,
                max_file_size_mb: 10,
                allowed_file_types: ["jpg", "jpeg", "png", "gif", "pdf", "doc", "docx", "xls", "xlsx", "zip"]
                    .map(String::from)
                    .to_vec(),
                posts_per_page: 20,
                comments_per_page: 20,
            },
            security: SecuritySettings {
                enable_reporting: true,
                auto_blind_threshold: 5,
                maintenance_mode: false,
                maintenance_message: "The system is under maintenance. Please try again later."
                    .to_string(),
            },
            legal: LegalSettings {
                footer_text: String::new(),
                terms_of_service: String::new(),
                privacy_policy: String::new(),
            },
        }
    }
}

/// The four independently saved forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSection {
    General,
    Content,
    Security,
    Legal,
}

impl SettingsSection {
    pub const ALL: [SettingsSection; 4] = [
        SettingsSection::General,
        SettingsSection::Content,
        SettingsSection::Security,
        SettingsSection::Legal,
    ];
}

impl fmt::Display for SettingsSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SettingsSection::General => "general",
            SettingsSection::Content => "content",
            SettingsSection::Security => "security",
            SettingsSection::Legal => "legal",
        })
    }
}

impl FromStr for SettingsSection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.to_string() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown settings section `{s}`")))
    }
}

fn parse_flag(key: &str, value: &str) -> DomainResult<bool> {
    match value {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(DomainError::Validation(format!(
            "`{key}` expects true or false"
        ))),
    }
}

fn parse_positive(key: &str, value: &str) -> DomainResult<u32> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| DomainError::Validation(format!("`{key}` must be a positive number")))
}

impl SystemSettings {
    /// Set one form field by its key. Returns the section the field belongs
    /// to, so the caller knows which form became dirty.
    pub fn apply(&mut self, key: &str, value: &str) -> DomainResult<SettingsSection> {
        use SettingsSection::*;

        let section = match key {
            "site_title" => {
                self.general.site_title = require(value, "Please enter a site title.")?;
                General
            }
            "site_description" => {
                self.general.site_description = value.trim().to_string();
                General
            }
            "allow_registration" => {
                self.general.allow_registration = parse_flag(key, value)?;
                General
            }
            "require_email_verification" => {
                self.general.require_email_verification = parse_flag(key, value)?;
                General
            }
            "allow_file_upload" => {
                self.content.allow_file_upload = parse_flag(key, value)?;
                Content
            }
            "max_file_size" => {
                self.content.max_file_size_mb = parse_positive(key, value)?;
                Content
            }
            "allowed_file_types" => {
                self.content.allowed_file_types = value
                    .split(',')
                    .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
                    .filter(|ext| !ext.is_empty())
                    .collect();
                Content
            }
            "posts_per_page" => {
                self.content.posts_per_page = parse_positive(key, value)?;
                Content
            }
            "comments_per_page" => {
                self.content.comments_per_page = parse_positive(key, value)?;
                Content
            }
            "enable_reporting" => {
                self.security.enable_reporting = parse_flag(key, value)?;
                Security
            }
            "auto_blind_threshold" => {
                self.security.auto_blind_threshold = parse_positive(key, value)?;
                Security
            }
            "maintenance_mode" => {
                self.security.maintenance_mode = parse_flag(key, value)?;
                Security
            }
            "maintenance_message" => {
                self.security.maintenance_message = value.trim().to_string();
                Security
            }
            "footer_text" => {
                self.legal.footer_text = value.to_string();
                Legal
            }
            "terms_of_service" => {
                self.legal.terms_of_service = value.to_string();
                Legal
            }
            "privacy_policy" => {
                self.legal.privacy_policy = value.to_string();
                Legal
            }
            other => {
                return Err(DomainError::Validation(format!(
                    "unknown setting `{other}`"
                )));
            }
        };
        Ok(section)
    }

    /// Check an upload against the content settings.
    pub fn check_upload(&self, file_name: &str, bytes: u64) -> DomainResult<()> {
        let content = &self.content;
        if !content.allow_file_upload {
            return Err(DomainError::Forbidden(
                "File uploads are disabled.".to_string(),
            ));
        }

        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if !content.allowed_file_types.iter().any(|t| *t == extension) {
            return Err(DomainError::Validation(format!(
                "`{file_name}` is not an allowed file type."
            )));
        }

        let limit = u64::from(content.max_file_size_mb) * 1024 * 1024;
        if bytes > limit {
            return Err(DomainError::Validation(format!(
                "`{file_name}` exceeds the {}MB upload limit.",
                content.max_file_size_mb
            )));
        }
        Ok(())
    }
}
