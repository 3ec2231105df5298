//! Mail transport interface

mod errors;
mod message;
mod transport;

pub use errors::TransportError;
pub use message::{DeliveryReceipt, OutgoingMessage};
pub use transport::{MailTransport, TransportSession};
