use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use super::models::{ReserveOutcome, UrlRecord};
use super::traits::UniquenessStore;
use crate::errors::{LinkVaultError, Result};

/// In-process store. Contents are lost on shutdown.
#[derive(Default)]
pub struct MemoryStore {
    inner: DashMap<String, UrlRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl UniquenessStore for MemoryStore {
    async fn try_reserve(&self, record: &UrlRecord) -> Result<ReserveOutcome> {
        // The entry guard holds the shard write lock across check and insert
        match self.inner.entry(record.short_code.clone()) {
            Entry::Occupied(_) => Ok(ReserveOutcome::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                debug!("MemoryStore: reserved '{}'", record.short_code);
                Ok(ReserveOutcome::Reserved)
            }
        }
    }

    async fn get(&self, code: &str) -> Result<Option<UrlRecord>> {
        Ok(self.inner.get(code).map(|r| r.value().clone()))
    }

    async fn delete(&self, code: &str) -> Result<()> {
        match self.inner.remove(code) {
            Some(_) => Ok(()),
            None => Err(LinkVaultError::not_found(format!(
                "Short code '{}' does not exist",
                code
            ))),
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn shutdown(&self) -> Result<()> {
        self.inner.clear();
        Ok(())
    }
}
