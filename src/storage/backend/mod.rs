//! SeaORM storage backend
//!
//! Durable store over SQLite, MySQL/MariaDB or PostgreSQL. Uniqueness is
//! enforced by the `short_code` primary key.

mod connection;
mod converters;
mod mutations;
mod query;
pub mod retry;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::config::StorageConfig;
use crate::errors::{LinkVaultError, Result};
use crate::storage::{ReserveOutcome, UniquenessStore, UrlRecord};

pub use connection::{connect_generic, connect_sqlite, run_migrations};

/// Infer the database kind from its URL
pub fn infer_backend_from_url(database_url: &str) -> Result<&'static str> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
    {
        Ok("sqlite")
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql")
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://")
    {
        Ok("postgres")
    } else {
        Err(LinkVaultError::config(format!(
            "Cannot infer database type from URL '{}'. Supported: sqlite:, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
    backend_name: &'static str,
    retry_config: retry::RetryConfig,
}

impl SeaOrmStore {
    /// Connect and bring the schema up to date
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        let database_url = config.database_url.trim();
        if database_url.is_empty() {
            return Err(LinkVaultError::config("storage.database_url is not set"));
        }

        let backend_name = infer_backend_from_url(database_url)?;

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url, config.pool_size).await?
        } else {
            connect_generic(database_url, backend_name, config.pool_size).await?
        };

        run_migrations(&db).await?;

        info!("{} store initialized", backend_name.to_uppercase());
        Ok(Self {
            db,
            backend_name,
            retry_config: retry::RetryConfig::from(config),
        })
    }
}

#[async_trait]
impl UniquenessStore for SeaOrmStore {
    async fn try_reserve(&self, record: &UrlRecord) -> Result<ReserveOutcome> {
        self.insert_if_absent(record).await
    }

    async fn get(&self, code: &str) -> Result<Option<UrlRecord>> {
        self.find(code).await
    }

    async fn delete(&self, code: &str) -> Result<()> {
        self.remove(code).await
    }

    fn backend_name(&self) -> &'static str {
        self.backend_name
    }

    async fn shutdown(&self) -> Result<()> {
        self.db.clone().close().await?;
        info!("{} store closed", self.backend_name.to_uppercase());
        Ok(())
    }
}
