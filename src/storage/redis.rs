use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::{debug, info};

use super::models::{ReserveOutcome, UrlRecord};
use super::traits::UniquenessStore;
use crate::config::StorageConfig;
use crate::errors::{LinkVaultError, Result};

/// Redis-backed store. Records are JSON strings under `<prefix><code>`;
/// `SETNX` provides the atomic reservation.
pub struct RedisStore {
    conn: ConnectionManager,
    key_prefix: String,
}

fn record_key(prefix: &str, code: &str) -> String {
    format!("{}{}", prefix, code)
}

impl RedisStore {
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        let client = redis::Client::open(config.redis_url.as_str())
            .map_err(|e| LinkVaultError::config(format!("Invalid Redis URL: {}", e)))?;

        // ConnectionManager reconnects on its own after a dropped connection
        let conn = ConnectionManager::new(client).await.map_err(|e| {
            LinkVaultError::storage_unavailable(format!(
                "Cannot connect to Redis at {}: {}",
                config.redis_url, e
            ))
        })?;

        info!("REDIS store initialized (prefix '{}')", config.redis_key_prefix);
        Ok(Self {
            conn,
            key_prefix: config.redis_key_prefix.clone(),
        })
    }
}

#[async_trait]
impl UniquenessStore for RedisStore {
    async fn try_reserve(&self, record: &UrlRecord) -> Result<ReserveOutcome> {
        let key = record_key(&self.key_prefix, &record.short_code);
        let payload = serde_json::to_string(record)?;

        let mut conn = self.conn.clone();
        let inserted: bool = conn.set_nx(&key, payload).await?;

        if inserted {
            debug!("RedisStore: reserved '{}'", record.short_code);
            Ok(ReserveOutcome::Reserved)
        } else {
            Ok(ReserveOutcome::AlreadyExists)
        }
    }

    async fn get(&self, code: &str) -> Result<Option<UrlRecord>> {
        let mut conn = self.conn.clone();
        let data: Option<String> = conn.get(record_key(&self.key_prefix, code)).await?;

        data.map(|raw| serde_json::from_str(&raw).map_err(LinkVaultError::from))
            .transpose()
    }

    async fn delete(&self, code: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let removed: u64 = conn.del(record_key(&self.key_prefix, code)).await?;

        if removed == 0 {
            return Err(LinkVaultError::not_found(format!(
                "Short code '{}' does not exist",
                code
            )));
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
