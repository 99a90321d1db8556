//! Short link allocation and resolution
//!
//! Custom aliases are reserved exactly as given or rejected. Random codes
//! are retried on collision up to `max_attempts` times.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::code_generator::{CodeGenerator, validate_custom};
use crate::config::GeneratorConfig;
use crate::errors::{LinkVaultError, Result};
use crate::storage::{ReserveOutcome, UniquenessStore, UrlRecord};

/// Request to shorten a URL
#[derive(Debug, Clone, Default)]
pub struct ShortenRequest {
    pub long_url: String,
    /// `None` or an empty string selects random mode
    pub custom_alias: Option<String>,
    pub owner_id: Option<String>,
}

impl ShortenRequest {
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
            ..Default::default()
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.custom_alias = Some(alias.into());
        self
    }

    pub fn with_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }
}

pub struct ShortenService {
    store: Arc<dyn UniquenessStore>,
    generator: CodeGenerator,
    max_attempts: u32,
    custom_alias_max_length: usize,
}

impl ShortenService {
    pub fn new(store: Arc<dyn UniquenessStore>, config: &GeneratorConfig) -> Result<Self> {
        Ok(Self {
            store,
            generator: CodeGenerator::new(config)?,
            max_attempts: config.max_attempts,
            custom_alias_max_length: config.custom_alias_max_length,
        })
    }

    /// Allocate a short code for `req.long_url`.
    ///
    /// # Errors
    /// - `InvalidUrl`: empty long URL
    /// - `InvalidAlias` / `AliasTaken`: custom mode only
    /// - `ExhaustedKeyspace`: every random attempt collided
    /// - `StorageUnavailable`: backend failure, returned without retrying
    pub async fn shorten(&self, req: ShortenRequest) -> Result<UrlRecord> {
        if req.long_url.trim().is_empty() {
            return Err(LinkVaultError::invalid_url("Long URL must not be empty"));
        }

        match req.custom_alias.filter(|a| !a.is_empty()) {
            Some(alias) => self.reserve_alias(alias, req.long_url, req.owner_id).await,
            None => self.reserve_random(req.long_url, req.owner_id).await,
        }
    }

    async fn reserve_alias(
        &self,
        alias: String,
        long_url: String,
        owner_id: Option<String>,
    ) -> Result<UrlRecord> {
        validate_custom(&alias, self.custom_alias_max_length)?;

        let record = UrlRecord::new(alias, long_url, owner_id);
        match self.store.try_reserve(&record).await? {
            ReserveOutcome::Reserved => {
                info!(
                    "ShortenService: reserved alias '{}' -> '{}'",
                    record.short_code, record.long_url
                );
                Ok(record)
            }
            ReserveOutcome::AlreadyExists => Err(LinkVaultError::alias_taken(format!(
                "Alias '{}' is already in use",
                record.short_code
            ))),
        }
    }

    async fn reserve_random(&self, long_url: String, owner_id: Option<String>) -> Result<UrlRecord> {
        let mut record = UrlRecord::new(String::new(), long_url, owner_id);

        for attempt in 1..=self.max_attempts {
            record.short_code = self.generator.generate();

            match self.store.try_reserve(&record).await? {
                ReserveOutcome::Reserved => {
                    info!(
                        "ShortenService: generated '{}' -> '{}' (attempt {})",
                        record.short_code, record.long_url, attempt
                    );
                    return Ok(record);
                }
                ReserveOutcome::AlreadyExists => {
                    debug!(
                        "ShortenService: collision on '{}' (attempt {}/{})",
                        record.short_code, attempt, self.max_attempts
                    );
                }
            }
        }

        warn!(
            "ShortenService: {} consecutive collisions with {:?} strategy (keyspace {:?})",
            self.max_attempts,
            self.generator.strategy(),
            self.generator.keyspace_size()
        );
        Err(LinkVaultError::exhausted_keyspace(format!(
            "No free short code found after {} attempts",
            self.max_attempts
        )))
    }

    /// Long URL for `code`
    pub async fn resolve(&self, code: &str) -> Result<String> {
        self.lookup(code).await.map(|record| record.long_url)
    }

    /// Full record for `code`
    pub async fn lookup(&self, code: &str) -> Result<UrlRecord> {
        self.store
            .get(code)
            .await?
            .ok_or_else(|| LinkVaultError::not_found(format!("Short code '{}' not found", code)))
    }

    /// Administrative removal. The code becomes available again.
    pub async fn delete(&self, code: &str) -> Result<()> {
        self.store.delete(code).await?;
        info!("ShortenService: deleted '{}'", code);
        Ok(())
    }
}
