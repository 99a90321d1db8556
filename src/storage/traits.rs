use async_trait::async_trait;

use super::models::{ReserveOutcome, UrlRecord};
use crate::errors::Result;

/// Keyed store enforcing short code uniqueness.
///
/// `try_reserve` is the only mutation on the allocation path and must be
/// atomic: for concurrent calls with the same code exactly one caller sees
/// [`ReserveOutcome::Reserved`]. Backend failures are reported as
/// `LinkVaultError::StorageUnavailable`, never as `AlreadyExists`.
#[async_trait]
pub trait UniquenessStore: Send + Sync {
    /// Insert `record` under `record.short_code` unless the code is taken.
    async fn try_reserve(&self, record: &UrlRecord) -> Result<ReserveOutcome>;

    async fn get(&self, code: &str) -> Result<Option<UrlRecord>>;

    /// Remove a record. Unknown codes yield `LinkVaultError::NotFound`.
    async fn delete(&self, code: &str) -> Result<()>;

    fn backend_name(&self) -> &'static str;

    /// Release connections at process teardown.
    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}
