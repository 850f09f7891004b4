//! `DomainRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    sea_query::Expr,
};

use expiry_watch_core::error::{CoreError, CoreResult};
use expiry_watch_core::traits::DomainRepository;
use expiry_watch_core::types::{DomainRecord, ExpiryUpdate};
use expiry_watch_core::utils::datetime;

use super::SqliteStore;
use super::entity::domain;

/// Parse an optional stored timestamp column.
fn parse_column(
    value: Option<String>,
    column: &str,
) -> CoreResult<Option<chrono::DateTime<chrono::Utc>>> {
    value
        .map(|s| {
            datetime::from_storage(&s)
                .map_err(|e| CoreError::SerializationError(format!("Invalid {column}: {e}")))
        })
        .transpose()
}

impl domain::Model {
    /// Convert a `SeaORM` row model into a `DomainRecord`.
    fn into_record(self) -> CoreResult<DomainRecord> {
        Ok(DomainRecord {
            id: self.id,
            name: self.name,
            cert_expiry: parse_column(self.cert_expiry, "cert_expiry")?,
            domain_expiry: parse_column(self.domain_expiry, "domain_expiry")?,
            last_check: parse_column(self.last_check, "last_check")?,
        })
    }
}

impl SqliteStore {
    async fn find_by_name(&self, name: &str) -> CoreResult<Option<domain::Model>> {
        domain::Entity::find()
            .filter(domain::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query domain: {e}")))
    }
}

#[async_trait]
impl DomainRepository for SqliteStore {
    async fn find_all(&self) -> CoreResult<Vec<DomainRecord>> {
        let rows = domain::Entity::find()
            .order_by_asc(domain::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query domains: {e}")))?;

        rows.into_iter().map(domain::Model::into_record).collect()
    }

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<DomainRecord>> {
        let row = domain::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query domain: {e}")))?;

        row.map(domain::Model::into_record).transpose()
    }

    async fn find_or_create(&self, name: &str) -> CoreResult<DomainRecord> {
        if let Some(existing) = self.find_by_name(name).await? {
            return existing.into_record();
        }

        let active_model = domain::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };

        match active_model.insert(&self.db).await {
            Ok(row) => {
                log::info!("[Store] Tracking new domain {name} (id {})", row.id);
                row.into_record()
            }
            Err(e) => {
                // Lost a race against a concurrent insert of the same name.
                if let Some(existing) = self.find_by_name(name).await? {
                    return existing.into_record();
                }
                Err(CoreError::StorageError(format!(
                    "Failed to insert domain {name}: {e}"
                )))
            }
        }
    }

    async fn update_expiry(&self, id: i64, update: &ExpiryUpdate) -> CoreResult<()> {
        let result = domain::Entity::update_many()
            .col_expr(
                domain::Column::CertExpiry,
                Expr::value(datetime::to_storage(&update.cert_expiry)),
            )
            .col_expr(
                domain::Column::DomainExpiry,
                Expr::value(datetime::to_storage(&update.domain_expiry)),
            )
            .col_expr(
                domain::Column::LastCheck,
                Expr::value(datetime::to_storage(&update.last_check)),
            )
            .filter(domain::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to update domain: {e}")))?;

        if result.rows_affected == 0 {
            return Err(CoreError::DomainNotFound(id));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> CoreResult<()> {
        domain::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to delete domain: {e}")))?;
        Ok(())
    }
}
