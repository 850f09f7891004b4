//! 监控域名管理服务

use std::sync::Arc;

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::services::{ExpiryResolver, ServiceContext};
use crate::types::{DomainRecord, ExpiryUpdate, RefreshFailure, RefreshSummary};

/// 监控域名管理服务
pub struct DomainService {
    ctx: Arc<ServiceContext>,
    resolver: ExpiryResolver,
}

impl DomainService {
    /// 创建域名服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        let resolver = ctx.resolver();
        Self { ctx, resolver }
    }

    /// 列出所有监控域名（按名称升序）
    pub async fn list_domains(&self) -> CoreResult<Vec<DomainRecord>> {
        self.ctx.domain_repository.find_all().await
    }

    /// 获取单个域名
    pub async fn get_domain(&self, id: i64) -> CoreResult<DomainRecord> {
        self.ctx
            .domain_repository
            .find_by_id(id)
            .await?
            .ok_or(CoreError::DomainNotFound(id))
    }

    /// Track every name in `text` (one per line) and refresh each right away.
    ///
    /// Blank lines are skipped and known names are reused. A name whose record
    /// cannot be created is logged and skipped; a failed refresh is logged and
    /// the record stays tracked. Returns the records in input order.
    pub async fn add_domains(&self, text: &str) -> Vec<DomainRecord> {
        let mut records = Vec::new();

        for name in parse_names(text) {
            let record = match self.ctx.domain_repository.find_or_create(name).await {
                Ok(record) => record,
                Err(e) => {
                    log::error!("[Domains] Failed to track {name}: {e}");
                    continue;
                }
            };

            match self.refresh_domain(&record).await {
                Ok(updated) => records.push(updated),
                Err(e) => {
                    log_refresh_failure(&record.name, &e);
                    records.push(record);
                }
            }
        }

        records
    }

    /// 删除域名（不存在时无操作）
    pub async fn delete_domain(&self, id: i64) -> CoreResult<()> {
        self.ctx.domain_repository.delete(id).await?;
        log::info!("[Domains] Deleted domain {id}");
        Ok(())
    }

    /// Resolve `record` and store both expiries with the check time.
    ///
    /// On failure nothing is written and the stored values stay as they were.
    pub async fn refresh_domain(&self, record: &DomainRecord) -> CoreResult<DomainRecord> {
        let result = self.resolver.resolve(&record.name).await?;
        let update = ExpiryUpdate::new(result, Utc::now());

        self.ctx
            .domain_repository
            .update_expiry(record.id, &update)
            .await?;

        let mut updated = record.clone();
        updated.apply(&update);
        log::info!(
            "[Domains] Refreshed {}: certificate {}, registration {}",
            updated.name,
            update.cert_expiry,
            update.domain_expiry
        );
        Ok(updated)
    }

    /// Refresh every tracked domain one at a time, in the order the records
    /// were created.
    ///
    /// Per-domain failures are collected in the summary and never stop the
    /// batch. Only a failure to list the domains is returned as an error.
    pub async fn refresh_all(&self) -> CoreResult<RefreshSummary> {
        let mut records = self.ctx.domain_repository.find_all().await?;
        records.sort_by_key(|record| record.id);
        let mut summary = RefreshSummary::default();

        for record in &records {
            match self.refresh_domain(record).await {
                Ok(_) => summary.refreshed += 1,
                Err(e) => {
                    log_refresh_failure(&record.name, &e);
                    summary.failed.push(RefreshFailure {
                        name: record.name.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        log::info!(
            "[Domains] Refresh finished: {} of {} refreshed",
            summary.refreshed,
            summary.attempted()
        );
        Ok(summary)
    }
}

/// Non-empty trimmed lines of a submitted name list.
fn parse_names(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

fn log_refresh_failure(name: &str, e: &CoreError) {
    if e.is_expected() {
        log::warn!("[Domains] Refresh of {name} failed: {e}");
    } else {
        log::error!("[Domains] Refresh of {name} failed: {e}");
    }
}
