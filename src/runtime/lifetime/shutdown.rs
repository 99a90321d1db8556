use tracing::{info, warn};

use super::startup::StartupContext;

/// Release the store. Errors are logged, not returned: at this point
/// there is nobody left to act on them.
pub async fn graceful_shutdown(ctx: StartupContext) {
    let backend = ctx.store.backend_name();
    drop(ctx.shorten_service);

    match ctx.store.shutdown().await {
        Ok(()) => info!("{} store shut down", backend),
        Err(e) => warn!("Error while shutting down {} store: {}", backend, e),
    }
}
