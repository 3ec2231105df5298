//! Mail server configuration lookup

mod mail_configuration;
mod repository;
mod resolver;

pub use mail_configuration::{ConfigType, MailConfiguration, ScopeId, SmtpCredentials};
pub use repository::ConfigStore;
pub use resolver::ConfigResolver;

#[cfg(test)]
pub mod tests {
    pub use super::repository::MockConfigStore;
}
