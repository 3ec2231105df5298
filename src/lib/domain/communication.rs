//! Email composition and delivery

pub mod composer;
pub mod configuration;
pub mod dispatcher;
pub mod email_addresses;
pub mod errors;
pub mod link_codes;
pub mod mailer;
pub mod purposes;
pub mod templates;
