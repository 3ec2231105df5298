//! Email composition: templates, link codes and substitution rendered into one HTML document

mod errors;
mod service;
mod settings;

pub use errors::ComposeEmailError;
pub use service::{EmailComposer, EmailComposerImpl};
pub use settings::ComposerSettings;

#[cfg(test)]
pub mod tests {
    pub use super::service::MockEmailComposer;
}
