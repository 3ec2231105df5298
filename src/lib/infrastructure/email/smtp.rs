//! SMTP transport implementation

use std::fmt;

use async_trait::async_trait;
use clap::Parser;
use lettre::{
    message::{Mailbox, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
        response::Response,
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

use crate::domain::communication::{
    configuration::{MailConfiguration, SmtpCredentials},
    mailer::{DeliveryReceipt, MailTransport, OutgoingMessage, TransportError, TransportSession},
};

/// SMTP configuration supplied on the command line or through the environment
#[derive(Clone, Debug, Parser)]
pub struct SmtpConfig {
    /// The SMTP host
    #[clap(long, env = "SMTP_HOST")]
    pub host: String,

    /// The SMTP port
    #[clap(long, env = "SMTP_PORT", default_value = "587")]
    pub port: u16,

    /// Connect over implicit TLS instead of STARTTLS
    #[clap(long, env = "SMTP_SECURE", default_value = "false")]
    pub secure: bool,

    /// Accept a self-signed server certificate
    #[clap(long, env = "SMTP_SELF_SIGNED", default_value = "false")]
    pub self_signed: bool,

    /// The SMTP username
    #[clap(long, env = "SMTP_USER")]
    pub username: Option<String>,

    /// The SMTP password
    #[clap(long, env = "SMTP_PASSWORD")]
    pub password: Option<String>,

    /// The sender email address
    #[clap(long, env = "SMTP_FROM")]
    pub from: String,

    /// The default subject line
    #[clap(long, env = "SMTP_SUBJECT", default_value = "")]
    pub subject: String,
}

impl From<SmtpConfig> for MailConfiguration {
    fn from(config: SmtpConfig) -> Self {
        let auth = match (config.username, config.password) {
            (Some(user), Some(pass)) => Some(SmtpCredentials { user, pass }),
            _ => None,
        };

        MailConfiguration {
            scope: None,
            host: config.host,
            port: config.port,
            secure: config.secure,
            self_signed: config.self_signed,
            auth,
            from: config.from,
            subject: config.subject,
        }
    }
}

/// Builds one lettre SMTP transport per session
#[derive(Debug, Default, Clone)]
pub struct SmtpTransportFactory;

impl SmtpTransportFactory {
    /// Create a new SMTP transport factory
    pub fn new() -> Self {
        Self
    }
}

impl MailTransport for SmtpTransportFactory {
    type Session = SmtpSession;

    fn create_session(&self, config: &MailConfiguration) -> Result<SmtpSession, TransportError> {
        // certificate relaxation lives in this transport's TLS parameters only
        let tls_parameters = TlsParameters::builder(config.host.clone())
            .dangerous_accept_invalid_certs(config.self_signed)
            .build()?;

        let tls = if config.secure {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .tls(tls);

        if let Some(auth) = &config.auth {
            builder = builder.credentials(Credentials::new(auth.user.clone(), auth.pass.clone()));
        }

        debug!(
            host = %config.host,
            port = config.port,
            secure = config.secure,
            self_signed = config.self_signed,
            "built SMTP session"
        );

        Ok(SmtpSession {
            transport: builder.build(),
            host: config.host.clone(),
            port: config.port,
        })
    }
}

/// A single SMTP transport built from one mail configuration
pub struct SmtpSession {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
    port: u16,
}

impl fmt::Debug for SmtpSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSession")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

fn build_message(message: &OutgoingMessage) -> Result<Message, TransportError> {
    let from: Mailbox = message.from.parse()?;
    let to: Mailbox = message.to.as_str().parse()?;

    Ok(Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject.clone())
        .singlepart(SinglePart::html(message.html.clone()))?)
}

fn delivery_receipt(response: &Response) -> DeliveryReceipt {
    DeliveryReceipt {
        code: response.code().to_string(),
        message: response.message().map(str::to_string).collect(),
    }
}

#[async_trait]
impl TransportSession for SmtpSession {
    #[mutants::skip]
    async fn send(&self, message: &OutgoingMessage) -> Result<DeliveryReceipt, TransportError> {
        let email = build_message(message)?;

        let response = self.transport.send(email).await?;

        Ok(delivery_receipt(&response))
    }

    #[mutants::skip]
    async fn verify(&self) -> Result<(), TransportError> {
        if self.transport.test_connection().await? {
            Ok(())
        } else {
            Err(TransportError::VerificationFailed {
                host: self.host.clone(),
                port: self.port,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use lettre::transport::smtp::response::{Category, Code, Detail, Severity};
    use testresult::TestResult;
    use tokio::{
        io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader},
        net::TcpListener,
    };
    use tokio_native_tls::{native_tls, TlsAcceptor};

    use crate::domain::communication::email_addresses::EmailAddress;

    use super::*;

    /// Minimal SMTP dialogue: greeting, EHLO, NOOP, one DATA transaction, QUIT
    async fn serve_smtp<S>(stream: S) -> std::io::Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let (reader, mut writer) = tokio::io::split(stream);
        let mut lines = BufReader::new(reader).lines();
        let mut in_data = false;

        writer.write_all(b"220 localhost ESMTP\r\n").await?;
        writer.flush().await?;

        while let Some(line) = lines.next_line().await? {
            let reply: &[u8] = if in_data {
                if line != "." {
                    continue;
                }
                in_data = false;
                b"250 2.0.0 Ok: queued\r\n"
            } else {
                let command = line.to_ascii_uppercase();

                if command.starts_with("QUIT") {
                    writer.write_all(b"221 2.0.0 Bye\r\n").await?;
                    writer.flush().await?;
                    break;
                } else if command.starts_with("EHLO") || command.starts_with("HELO") {
                    b"250 localhost\r\n"
                } else if command.starts_with("DATA") {
                    in_data = true;
                    b"354 End data with <CR><LF>.<CR><LF>\r\n"
                } else {
                    b"250 2.0.0 Ok\r\n"
                }
            };

            writer.write_all(reply).await?;
            writer.flush().await?;
        }

        Ok(())
    }

    /// Implicit-TLS SMTP server presenting a freshly generated self-signed certificate
    async fn spawn_self_signed_server() -> anyhow::Result<u16> {
        let rcgen::CertifiedKey { cert, key_pair } = rcgen::generate_simple_self_signed(vec![
            "127.0.0.1".to_string(),
            "localhost".to_string(),
        ])?;
        let identity = native_tls::Identity::from_pkcs8(
            cert.pem().as_bytes(),
            key_pair.serialize_pem().as_bytes(),
        )?;
        let acceptor = TlsAcceptor::from(native_tls::TlsAcceptor::new(identity)?);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let acceptor = acceptor.clone();

                tokio::spawn(async move {
                    // rejected handshakes end here
                    if let Ok(stream) = acceptor.accept(stream).await {
                        let _ = serve_smtp(stream).await;
                    }
                });
            }
        });

        Ok(port)
    }

    fn local_tls_config(port: u16, self_signed: bool) -> MailConfiguration {
        MailConfiguration {
            scope: None,
            host: "127.0.0.1".to_string(),
            port,
            secure: true,
            self_signed,
            auth: None,
            from: "noreply@example.com".to_string(),
            subject: "Hello".to_string(),
        }
    }

    #[tokio::test]
    async fn test_self_signed_relaxation_is_scoped_to_its_session() -> TestResult {
        let port = spawn_self_signed_server().await?;
        let factory = SmtpTransportFactory::new();

        let relaxed = factory.create_session(&local_tls_config(port, true))?;
        let strict = factory.create_session(&local_tls_config(port, false))?;

        relaxed.verify().await?;

        let result = strict.verify().await;

        assert!(matches!(result, Err(TransportError::Smtp(_))));

        // the strict session failing leaves the relaxed one usable
        relaxed.verify().await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_send_returns_server_reply() -> TestResult {
        let port = spawn_self_signed_server().await?;
        let session = SmtpTransportFactory::new().create_session(&local_tls_config(port, true))?;

        let message = OutgoingMessage {
            from: "noreply@example.com".to_string(),
            to: EmailAddress::new("email@example.com")?,
            subject: "Welcome".to_string(),
            html: "<p>Hi</p>".to_string(),
        };

        let receipt = session.send(&message).await?;

        assert_eq!(receipt.code, "250");
        assert_eq!(receipt.message, vec!["2.0.0 Ok: queued".to_string()]);

        Ok(())
    }

    #[test]
    fn test_delivery_receipt_copies_reply_lines() {
        let response = Response::new(
            Code::new(
                Severity::PositiveCompletion,
                Category::MailSystem,
                Detail::Zero,
            ),
            vec!["2.0.0 Ok: queued as 4F2A1".to_string()],
        );

        let receipt = delivery_receipt(&response);

        assert_eq!(receipt.code, "250");
        assert_eq!(receipt.message, vec!["2.0.0 Ok: queued as 4F2A1".to_string()]);
    }

    fn config() -> MailConfiguration {
        MailConfiguration {
            scope: None,
            host: "smtp.example.com".to_string(),
            port: 2525,
            secure: false,
            self_signed: true,
            auth: Some(SmtpCredentials {
                user: "mailer".to_string(),
                pass: "secret".to_string(),
            }),
            from: "Acme <noreply@example.com>".to_string(),
            subject: "Hello".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_session_keeps_connection_target() -> TestResult {
        let session = SmtpTransportFactory::new().create_session(&config())?;

        assert_eq!(session.host, "smtp.example.com");
        assert_eq!(session.port, 2525);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_session_with_implicit_tls() -> TestResult {
        let mut config = config();
        config.secure = true;
        config.self_signed = false;
        config.auth = None;

        let session = SmtpTransportFactory::new().create_session(&config)?;

        assert_eq!(session.port, 2525);

        Ok(())
    }

    #[test]
    fn test_build_message_sets_headers() -> TestResult {
        let message = OutgoingMessage {
            from: "Acme <noreply@example.com>".to_string(),
            to: EmailAddress::new("email@example.com")?,
            subject: "Welcome".to_string(),
            html: "<p>Hi</p>".to_string(),
        };

        let formatted = String::from_utf8(build_message(&message)?.formatted())?;

        assert!(formatted.contains("From: Acme <noreply@example.com>"));
        assert!(formatted.contains("To: email@example.com"));
        assert!(formatted.contains("Subject: Welcome"));
        assert!(formatted.contains("Content-Type: text/html; charset=utf-8"));

        Ok(())
    }

    #[test]
    fn test_build_message_rejects_invalid_sender() -> TestResult {
        let message = OutgoingMessage {
            from: "not an address".to_string(),
            to: EmailAddress::new("email@example.com")?,
            subject: "Welcome".to_string(),
            html: "<p>Hi</p>".to_string(),
        };

        assert!(matches!(
            build_message(&message),
            Err(TransportError::InvalidAddress(_))
        ));

        Ok(())
    }

    #[test]
    fn test_smtp_config_without_password_has_no_credentials() {
        let config = SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            secure: false,
            self_signed: false,
            username: Some("mailer".to_string()),
            password: None,
            from: "noreply@example.com".to_string(),
            subject: String::new(),
        };

        let mail_config = MailConfiguration::from(config);

        assert!(mail_config.auth.is_none());
        assert_eq!(mail_config.scope, None);
    }
}
