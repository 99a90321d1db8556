//! Write path for SeaOrmStore

use sea_orm::{DbErr, EntityTrait, SqlErr};
use tracing::{debug, info};

use super::SeaOrmStore;
use super::converters::record_to_active_model;
use super::retry::{self, Statement};
use crate::errors::{LinkVaultError, Result};
use crate::storage::{ReserveOutcome, UrlRecord};

use migration::entities::url_record;

/// Duplicate primary key, reported the same way by all three drivers
fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

impl SeaOrmStore {
    /// Plain INSERT against the primary key; the database arbitrates races.
    ///
    /// Only failures that guarantee the row was not written are replayed. A
    /// replay after a lost acknowledgement would collide with our own row
    /// and be misreported as `AlreadyExists`.
    pub(super) async fn insert_if_absent(&self, record: &UrlRecord) -> Result<ReserveOutcome> {
        let db = &self.db;

        let result = retry::with_retry(
            &format!("try_reserve({})", record.short_code),
            Statement::Write,
            self.retry_config,
            || async move {
                url_record::Entity::insert(record_to_active_model(record))
                    .exec_without_returning(db)
                    .await
            },
        )
        .await;

        match result {
            Ok(_) => {
                debug!("Reserved short code '{}'", record.short_code);
                Ok(ReserveOutcome::Reserved)
            }
            Err(e) if is_unique_violation(&e) => Ok(ReserveOutcome::AlreadyExists),
            Err(e) => Err(LinkVaultError::storage_unavailable(format!(
                "Failed to reserve '{}': {}",
                record.short_code, e
            ))),
        }
    }

    pub(super) async fn remove(&self, code: &str) -> Result<()> {
        let db = &self.db;

        let result = retry::with_retry(
            &format!("delete({})", code),
            Statement::Write,
            self.retry_config,
            || async move { url_record::Entity::delete_by_id(code).exec(db).await },
        )
        .await
        .map_err(|e| {
            LinkVaultError::storage_unavailable(format!("Failed to delete '{}': {}", code, e))
        })?;

        if result.rows_affected == 0 {
            return Err(LinkVaultError::not_found(format!(
                "Short code '{}' does not exist",
                code
            )));
        }

        info!("Short code deleted: {}", code);
        Ok(())
    }
}
