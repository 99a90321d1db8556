use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::StaticConfig;
use crate::services::ShortenService;
use crate::storage::{StorageFactory, UniquenessStore};

/// Everything a surface needs to serve requests.
///
/// The store is owned here rather than held in a global; hand the context
/// back to [`super::shutdown::graceful_shutdown`] when done.
pub struct StartupContext {
    pub store: Arc<dyn UniquenessStore>,
    pub shorten_service: Arc<ShortenService>,
}

pub async fn prepare_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Preparing startup context...");

    let store = StorageFactory::create(&config.storage)
        .await
        .context("Failed to create storage backend")?;

    let shorten_service = ShortenService::new(store.clone(), &config.generator)
        .context("Invalid generator configuration")?;

    info!(
        "Startup completed in {:.2?} ({} store, {:?} codes)",
        start_time.elapsed(),
        store.backend_name(),
        config.generator.strategy
    );

    Ok(StartupContext {
        store,
        shorten_service: Arc::new(shorten_service),
    })
}
