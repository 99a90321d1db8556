use std::sync::Arc;

use tracing::info;

use crate::config::{StorageBackend, StorageConfig};
use crate::errors::Result;

pub mod backend;
pub mod memory;
pub mod models;
pub mod redis;
pub mod traits;

pub use backend::SeaOrmStore;
pub use memory::MemoryStore;
pub use models::{ReserveOutcome, UrlRecord};
pub use redis::RedisStore;
pub use traits::UniquenessStore;

pub struct StorageFactory;

impl StorageFactory {
    /// Build the configured backend. The caller owns the returned store
    /// and is responsible for calling `shutdown` on it.
    pub async fn create(config: &StorageConfig) -> Result<Arc<dyn UniquenessStore>> {
        let store: Arc<dyn UniquenessStore> = match config.backend {
            StorageBackend::Database => Arc::new(SeaOrmStore::new(config).await?),
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::Redis => Arc::new(RedisStore::new(config).await?),
        };

        info!("Using storage backend: {}", store.backend_name());
        Ok(store)
    }
}
