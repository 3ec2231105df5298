//! Postgres module

use anyhow::Result;
use clap::Parser;
use sqlx::PgPool;

mod configurations;
mod link_codes;
mod templates;
mod users;

/// Database connection
#[derive(Debug, Clone)]
pub struct PostgresDatabase {
    /// The database connection pool
    pub pool: PgPool,
}

impl PostgresDatabase {
    /// Create a new database connection
    #[mutants::skip]
    pub async fn new(connection_string: &str) -> Result<Self> {
        Ok(Self {
            pool: PgPool::connect(connection_string).await?,
        })
    }

    /// Apply any pending schema migrations
    #[mutants::skip]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;

        Ok(())
    }
}

/// Database connection details
#[derive(Debug, Clone, Parser)]
pub struct DatabaseConnectionDetails {
    /// The database connection string
    #[arg(long, env = "DATABASE_URL")]
    pub connection_string: String,
}
