//! Outgoing messages and delivery receipts

use crate::domain::communication::email_addresses::EmailAddress;

/// A single HTML message ready for submission
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// The sender of the email
    pub from: String,

    /// The recipient of the email
    pub to: EmailAddress,

    /// The subject of the email
    pub subject: String,

    /// The rendered HTML document
    pub html: String,
}

/// What the transport reported when it accepted a message
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Server reply code
    pub code: String,

    /// Server reply lines
    pub message: Vec<String>,
}
