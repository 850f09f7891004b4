//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult, ToolboxError};
use crate::services::ServiceContext;
use crate::traits::{CertificateProbe, DomainRepository, WhoisProbe};
use crate::types::{DomainRecord, ExpiryUpdate, PeerCertificate};
use expiry_watch_toolbox::ToolboxResult;

/// Noon UTC on the given day.
pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// A trimmed Verisign-style answer expiring 2026-08-13T04:00:00Z.
pub fn verisign_answer() -> &'static str {
    "   Domain Name: EXAMPLE.COM\n\
     \x20  Registry Domain ID: 2336799_DOMAIN_COM-VRSN\n\
     \x20  Updated Date: 2024-08-14T07:01:34Z\n\
     \x20  Creation Date: 1995-08-14T04:00:00Z\n\
     \x20  Registry Expiry Date: 2026-08-13T04:00:00Z\n\
     \x20  Registrar: RESERVED-Internet Assigned Numbers Authority\n"
}

// ===== MockDomainRepository =====

/// In-memory repository keyed by id, with names kept unique.
pub struct MockDomainRepository {
    records: RwLock<BTreeMap<i64, DomainRecord>>,
    next_id: AtomicUsize,
    /// find_or_create 对这些名称返回存储错误
    failing_names: RwLock<HashSet<String>>,
}

impl MockDomainRepository {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicUsize::new(1),
            failing_names: RwLock::new(HashSet::new()),
        }
    }

    pub async fn fail_creation_of(&self, name: &str) {
        self.failing_names.write().await.insert(name.to_string());
    }
}

#[async_trait]
impl DomainRepository for MockDomainRepository {
    async fn find_all(&self) -> CoreResult<Vec<DomainRecord>> {
        let mut all: Vec<_> = self.records.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<DomainRecord>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn find_or_create(&self, name: &str) -> CoreResult<DomainRecord> {
        if self.failing_names.read().await.contains(name) {
            return Err(CoreError::StorageError(format!("cannot insert {name}")));
        }

        let mut records = self.records.write().await;
        if let Some(existing) = records.values().find(|r| r.name == name) {
            return Ok(existing.clone());
        }

        let id = i64::try_from(self.next_id.fetch_add(1, Ordering::SeqCst)).unwrap_or_default();
        let record = DomainRecord::new(id, name);
        records.insert(id, record.clone());
        Ok(record)
    }

    async fn update_expiry(&self, id: i64, update: &ExpiryUpdate) -> CoreResult<()> {
        let mut records = self.records.write().await;
        let record = records.get_mut(&id).ok_or(CoreError::DomainNotFound(id))?;
        record.apply(update);
        Ok(())
    }

    async fn delete(&self, id: i64) -> CoreResult<()> {
        self.records.write().await.remove(&id);
        Ok(())
    }
}

// ===== Probes =====

/// Certificate probe returning a fixed chain or error and counting calls.
pub struct StubCertificateProbe {
    response: ToolboxResult<Vec<PeerCertificate>>,
    calls: AtomicUsize,
}

impl StubCertificateProbe {
    pub fn with_chain(chain: Vec<PeerCertificate>) -> Self {
        Self {
            response: Ok(chain),
            calls: AtomicUsize::new(0),
        }
    }

    /// A CA certificate followed by a leaf expiring at `not_after`.
    pub fn with_leaf(not_after: DateTime<Utc>) -> Self {
        Self::with_chain(vec![
            PeerCertificate::new(true, at(2035, 1, 1)),
            PeerCertificate::new(false, not_after),
        ])
    }

    pub fn failing(error: ToolboxError) -> Self {
        Self {
            response: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CertificateProbe for StubCertificateProbe {
    async fn peer_chain(&self, _host: &str) -> ToolboxResult<Vec<PeerCertificate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

/// WHOIS probe returning a fixed answer or error and recording queries.
pub struct StubWhoisProbe {
    response: ToolboxResult<String>,
    queried: Mutex<Vec<String>>,
}

impl StubWhoisProbe {
    pub fn answering(raw: &str) -> Self {
        Self {
            response: Ok(raw.to_string()),
            queried: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ToolboxError) -> Self {
        Self {
            response: Err(error),
            queried: Mutex::new(Vec::new()),
        }
    }

    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().map(|q| q.clone()).unwrap_or_default()
    }

    pub fn calls(&self) -> usize {
        self.queried().len()
    }
}

#[async_trait]
impl WhoisProbe for StubWhoisProbe {
    async fn query(&self, registrable_domain: &str) -> ToolboxResult<String> {
        if let Ok(mut queried) = self.queried.lock() {
            queried.push(registrable_domain.to_string());
        }
        self.response.clone()
    }
}

// ===== 工厂函数 =====

/// 创建测试用 `ServiceContext`，同时返回 mock 仓库以便断言。
pub fn create_test_context(
    certificate_probe: StubCertificateProbe,
    whois_probe: StubWhoisProbe,
) -> (Arc<ServiceContext>, Arc<MockDomainRepository>) {
    let repo = Arc::new(MockDomainRepository::new());
    let ctx = Arc::new(ServiceContext::new(
        repo.clone(),
        Arc::new(certificate_probe),
        Arc::new(whois_probe),
    ));
    (ctx, repo)
}
