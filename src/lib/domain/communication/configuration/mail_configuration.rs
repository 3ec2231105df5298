//! Mail configuration records

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier narrowing a configuration lookup to a tenant or group
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeId(String);

impl ScopeId {
    /// Create a new scope identifier
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of configuration record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigType {
    /// SMTP mail server settings
    Smtp,
}

impl ConfigType {
    /// The identifier used in the config store
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Smtp => "SMTP",
        }
    }
}

/// SMTP login
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmtpCredentials {
    /// Login name
    pub user: String,

    /// Login password
    pub pass: String,
}

impl fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("user", &self.user)
            .field("pass", &"********")
            .finish()
    }
}

/// Mail server configuration resolved for a scope
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailConfiguration {
    /// Scope the record belongs to; `None` is the global default
    #[serde(default)]
    pub scope: Option<ScopeId>,

    /// SMTP host
    pub host: String,

    /// SMTP port
    pub port: u16,

    /// Connect over implicit TLS instead of upgrading with STARTTLS
    pub secure: bool,

    /// Accept self-signed certificates for sessions built from this record
    #[serde(default)]
    pub self_signed: bool,

    /// Optional SMTP login
    #[serde(default)]
    pub auth: Option<SmtpCredentials>,

    /// Default sender address
    pub from: String,

    /// Default subject line
    pub subject: String,
}
