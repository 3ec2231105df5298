#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Command line for checking, verifying and sending transactional email

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tenant_mailer::{
    domain::{
        auth::users::UserRepository,
        communication::{
            composer::{ComposerSettings, EmailComposerImpl},
            configuration::{MailConfiguration, ScopeId},
            dispatcher::{ConfigVerifier, MailDispatcher, MailDispatcherImpl, SendOptions},
            email_addresses::EmailAddress,
            purposes::EmailPurpose,
        },
    },
    infrastructure::{
        database::postgres::{DatabaseConnectionDetails, PostgresDatabase},
        email::smtp::{SmtpConfig, SmtpTransportFactory},
        templating::handlebars_renderer::HandlebarsRenderer,
    },
};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
#[command(name = "mailer", version)]
pub struct Args {
    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report whether email is configured for a scope
    Check(CheckArgs),

    /// Compose and send an email
    Send(SendArgs),

    /// Check that an SMTP configuration can connect
    Verify(VerifyArgs),
}

/// Arguments for `check`
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// The database connection details
    #[clap(flatten)]
    pub db: DatabaseConnectionDetails,

    /// Tenant or group scope; omit for the global configuration
    #[arg(long)]
    pub scope: Option<String>,
}

/// Arguments for `send`
#[derive(Debug, clap::Args)]
pub struct SendArgs {
    /// The database connection details
    #[clap(flatten)]
    pub db: DatabaseConnectionDetails,

    /// Values exposed to every template
    #[clap(flatten)]
    pub settings: SettingsArgs,

    /// Recipient address
    #[arg(long)]
    pub to: String,

    /// Email purpose: invitation, password-recovery or welcome
    #[arg(long)]
    pub purpose: EmailPurpose,

    /// Tenant or group scope; omit for the global configuration
    #[arg(long)]
    pub scope: Option<String>,

    /// Recipient's user ID
    #[arg(long)]
    pub user_id: Option<Uuid>,
}

/// Arguments for `verify`
#[derive(Debug, clap::Args)]
pub struct VerifyArgs {
    /// The SMTP configuration to check
    #[clap(flatten)]
    pub smtp: SmtpConfig,
}

/// Application settings for templates
#[derive(Debug, clap::Args)]
pub struct SettingsArgs {
    /// Product name shown in emails
    #[arg(long, env = "APP_NAME")]
    pub app_name: String,

    /// Public base URL used to build links
    #[arg(long, env = "APP_BASE_URL")]
    pub base_url: String,
}

impl From<SettingsArgs> for ComposerSettings {
    fn from(args: SettingsArgs) -> Self {
        ComposerSettings {
            app_name: args.app_name,
            base_url: args.base_url,
        }
    }
}

type Dispatcher = MailDispatcherImpl<
    PostgresDatabase,
    EmailComposerImpl<PostgresDatabase, PostgresDatabase, HandlebarsRenderer>,
    SmtpTransportFactory,
>;

fn dispatcher(db: Arc<PostgresDatabase>, settings: ComposerSettings) -> Dispatcher {
    let composer = EmailComposerImpl::new(
        db.clone(),
        db.clone(),
        Arc::new(HandlebarsRenderer::new()),
        settings,
    );

    MailDispatcherImpl::new(db, Arc::new(composer), Arc::new(SmtpTransportFactory::new()))
}

async fn connect(details: &DatabaseConnectionDetails) -> Result<Arc<PostgresDatabase>> {
    let db = PostgresDatabase::new(&details.connection_string)
        .await
        .context("failed to connect to the database")?;

    db.migrate().await?;

    Ok(Arc::new(db))
}

async fn check(args: CheckArgs) -> Result<()> {
    let db = connect(&args.db).await?;
    let scope = args.scope.map(ScopeId::new);

    let configured = dispatcher(db, ComposerSettings::default())
        .is_email_configured(scope.as_ref())
        .await;

    println!("{}", if configured { "configured" } else { "not configured" });

    Ok(())
}

async fn send(args: SendArgs) -> Result<()> {
    let db = connect(&args.db).await?;
    let email = EmailAddress::new(&args.to)?;

    let user = match args.user_id {
        Some(id) => Some(db.get_user_by_id(&id).await?),
        None => None,
    };

    let options = SendOptions {
        scope: args.scope.map(ScopeId::new),
        user,
    };

    let receipt = dispatcher(db, args.settings.into())
        .send_email(&email, args.purpose, &options)
        .await?;

    println!("{} {}", receipt.code, receipt.message.join(" "));

    Ok(())
}

async fn verify(args: VerifyArgs) -> Result<()> {
    let config = MailConfiguration::from(args.smtp);

    ConfigVerifier::new(Arc::new(SmtpTransportFactory::new()))
        .verify(&config)
        .await?;

    println!("{}:{} accepted the connection", config.host, config.port);

    Ok(())
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match Args::parse().command {
        Command::Check(args) => check(args).await,
        Command::Send(args) => send(args).await,
        Command::Verify(args) => verify(args).await,
    }
}
