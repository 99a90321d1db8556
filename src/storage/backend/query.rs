//! Read path for SeaOrmStore

use sea_orm::EntityTrait;

use super::SeaOrmStore;
use super::converters::model_to_record;
use super::retry::{self, Statement};
use crate::errors::{LinkVaultError, Result};
use crate::storage::UrlRecord;

use migration::entities::url_record;

impl SeaOrmStore {
    pub(super) async fn find(&self, code: &str) -> Result<Option<UrlRecord>> {
        let db = &self.db;

        let model = retry::with_retry(
            &format!("get({})", code),
            Statement::Read,
            self.retry_config,
            || async move { url_record::Entity::find_by_id(code).one(db).await },
        )
        .await
        .map_err(|e| {
            LinkVaultError::storage_unavailable(format!("Failed to look up '{}': {}", code, e))
        })?;

        Ok(model.map(model_to_record))
    }
}
