//! 监控域名持久化抽象 Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{DomainRecord, ExpiryUpdate};

/// Tracked-domain repository.
///
/// Implementations:
/// - `expiry-watch-app`: `SqliteStore` (`SeaORM`)
/// - tests: `MockDomainRepository` (in memory)
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Every record, ordered by name ascending.
    async fn find_all(&self) -> CoreResult<Vec<DomainRecord>>;

    /// Look up a single record.
    ///
    /// # Returns
    /// * `Some(record)` - found
    /// * `None` - no record with this id
    async fn find_by_id(&self, id: i64) -> CoreResult<Option<DomainRecord>>;

    /// Return the record named `name`, creating an unchecked one if absent.
    ///
    /// Names are unique; calling this twice with the same name yields the same id.
    async fn find_or_create(&self, name: &str) -> CoreResult<DomainRecord>;

    /// Write both expiries and the check time in one statement.
    ///
    /// # Errors
    /// `DomainNotFound` when no record has this id.
    async fn update_expiry(&self, id: i64, update: &ExpiryUpdate) -> CoreResult<()>;

    /// Delete a record. Unknown ids are not an error.
    async fn delete(&self, id: i64) -> CoreResult<()>;
}
