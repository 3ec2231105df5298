//! Transport and session traits

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::{
    configuration::MailConfiguration,
    mailer::{DeliveryReceipt, OutgoingMessage, TransportError},
};

/// Builds transport sessions from mail configurations
pub trait MailTransport: Clone + Send + Sync + 'static {
    /// Session type produced by this transport
    type Session: TransportSession;

    /// Build a session for one send or verify call.
    ///
    /// Connection options, including any relaxed certificate checks, apply to the
    /// returned session only.
    fn create_session(&self, config: &MailConfiguration) -> Result<Self::Session, TransportError>;
}

/// A single-use connection to a mail server
#[async_trait]
pub trait TransportSession: Send + Sync {
    /// Submit one message
    async fn send(&self, message: &OutgoingMessage) -> Result<DeliveryReceipt, TransportError>;

    /// Check that the server accepts a connection with the session's settings
    async fn verify(&self) -> Result<(), TransportError>;
}

#[cfg(test)]
mock! {
    pub TransportSession {}

    #[async_trait]
    impl TransportSession for TransportSession {
        async fn send(&self, message: &OutgoingMessage) -> Result<DeliveryReceipt, TransportError>;
        async fn verify(&self) -> Result<(), TransportError>;
    }
}

#[cfg(test)]
mock! {
    pub MailTransport {}

    impl Clone for MailTransport {
        fn clone(&self) -> Self;
    }

    impl MailTransport for MailTransport {
        type Session = MockTransportSession;

        fn create_session(&self, config: &MailConfiguration) -> Result<MockTransportSession, TransportError>;
    }
}
