//! Email purposes and template categories

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The reason an email is sent, also used as the template lookup key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmailPurpose {
    /// The outer HTML document shell
    Base,

    /// Shared styles injected into the shell
    Styles,

    /// Invitation to join an account
    Invitation,

    /// Password recovery link
    PasswordRecovery,

    /// Welcome message after sign-up
    Welcome,
}

/// Purposes that can be composed into a complete email.
pub const FULL_PURPOSES: [EmailPurpose; 3] = [
    EmailPurpose::Invitation,
    EmailPurpose::PasswordRecovery,
    EmailPurpose::Welcome,
];

impl EmailPurpose {
    /// Whether this purpose is a complete email rather than a structural fragment
    pub fn is_full(&self) -> bool {
        FULL_PURPOSES.contains(self)
    }

    /// The identifier used in the template store
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "BASE",
            Self::Styles => "STYLES",
            Self::Invitation => "INVITATION",
            Self::PasswordRecovery => "PASSWORD_RECOVERY",
            Self::Welcome => "WELCOME",
        }
    }
}

impl fmt::Display for EmailPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unknown purpose identifier
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown email purpose: {0}")]
pub struct UnknownPurposeError(pub String);

impl FromStr for EmailPurpose {
    type Err = UnknownPurposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "BASE" => Ok(Self::Base),
            "STYLES" => Ok(Self::Styles),
            "INVITATION" => Ok(Self::Invitation),
            "PASSWORD_RECOVERY" => Ok(Self::PasswordRecovery),
            "WELCOME" => Ok(Self::Welcome),
            _ => Err(UnknownPurposeError(s.to_string())),
        }
    }
}

/// Template family namespace
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateCategory {
    /// Email templates
    Email,

    /// In-app notification templates
    Notification,
}

impl TemplateCategory {
    /// The identifier used in the template store
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
            Self::Notification => "NOTIFICATION",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
