//! Configuration verifier

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::communication::{
    configuration::MailConfiguration,
    mailer::{MailTransport, TransportError, TransportSession},
};

/// Checks that a mail configuration can establish a working session
#[derive(Debug, Clone)]
pub struct ConfigVerifier<X>
where
    X: MailTransport,
{
    transport: Arc<X>,
}

impl<X> ConfigVerifier<X>
where
    X: MailTransport,
{
    /// Creates a new configuration verifier
    pub fn new(transport: Arc<X>) -> Self {
        Self { transport }
    }

    /// Builds a session from `config` and runs the server handshake against it.
    pub async fn verify(&self, config: &MailConfiguration) -> Result<(), TransportError> {
        let session = self.transport.create_session(config)?;

        match session.verify().await {
            Ok(()) => {
                info!(host = %config.host, port = config.port, "mail configuration verified");
                Ok(())
            }
            Err(err) => {
                warn!(host = %config.host, port = config.port, "mail configuration rejected: {}", err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use testresult::TestResult;

    use crate::domain::communication::mailer::tests::{MockMailTransport, MockTransportSession};

    use super::*;

    fn config(self_signed: bool) -> MailConfiguration {
        MailConfiguration {
            scope: None,
            host: "smtp.example.com".to_string(),
            port: 465,
            secure: true,
            self_signed,
            auth: None,
            from: "noreply@example.com".to_string(),
            subject: "Hello".to_string(),
        }
    }

    #[tokio::test]
    async fn test_verify_builds_session_from_given_config() -> TestResult {
        let mut transport = MockMailTransport::new();

        transport
            .expect_create_session()
            .times(1)
            .withf(|config| config.self_signed && config.host == "smtp.example.com")
            .returning(|_| {
                let mut session = MockTransportSession::new();
                session.expect_verify().times(1).returning(|| Ok(()));
                session.expect_send().times(0);
                Ok(session)
            });

        let verifier = ConfigVerifier::new(Arc::new(transport));

        verifier.verify(&config(true)).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_verify_surfaces_transport_failure() {
        let mut transport = MockMailTransport::new();

        transport.expect_create_session().times(1).returning(|_| {
            let mut session = MockTransportSession::new();
            session
                .expect_verify()
                .times(1)
                .returning(|| Err(TransportError::UnknownError(anyhow!("authentication failed"))));
            Ok(session)
        });

        let verifier = ConfigVerifier::new(Arc::new(transport));

        let result = verifier.verify(&config(false)).await;

        assert!(matches!(result, Err(TransportError::UnknownError(e)) if e.to_string() == "authentication failed"));
    }
}
