//! Application settings exposed to templates

use serde::Serialize;

/// Application-wide values merged into every substitution context
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ComposerSettings {
    /// Product name shown in emails
    pub app_name: String,

    /// Public base URL used to build links
    pub base_url: String,
}
