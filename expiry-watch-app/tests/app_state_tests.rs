#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `AppStateBuilder` and the domain workflow over `SqliteStore`.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use expiry_watch_app::AppStateBuilder;
use expiry_watch_app::adapters::SqliteStore;
use expiry_watch_core::error::{CoreError, ToolboxError, ToolboxResult};
use expiry_watch_core::traits::{CertificateProbe, DomainRepository, WhoisProbe};
use expiry_watch_core::types::PeerCertificate;

async fn create_test_sqlite_store() -> (Arc<SqliteStore>, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let db_path = tmp.path().join("test.db");
    let store = SqliteStore::new(&db_path)
        .await
        .expect("failed to create SqliteStore");
    (Arc::new(store), tmp)
}

// ===== Mock Implementations =====

/// Leaf certificate expiring 2025-03-01, failing for hosts under `.invalid`.
struct FixedCertificateProbe {
    calls: AtomicUsize,
}

#[async_trait]
impl CertificateProbe for FixedCertificateProbe {
    async fn peer_chain(&self, host: &str) -> ToolboxResult<Vec<PeerCertificate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if host.ends_with(".invalid") {
            return Err(ToolboxError::TlsConnectFailed("no such host".to_string()));
        }
        Ok(vec![PeerCertificate::new(
            false,
            Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        )])
    }
}

struct FixedWhoisProbe;

#[async_trait]
impl WhoisProbe for FixedWhoisProbe {
    async fn query(&self, _registrable_domain: &str) -> ToolboxResult<String> {
        Ok("Registrar Registration Expiration Date: 2026-08-13T04:00:00Z\n".to_string())
    }
}

fn certificate_probe() -> Arc<FixedCertificateProbe> {
    Arc::new(FixedCertificateProbe {
        calls: AtomicUsize::new(0),
    })
}

// ===== Builder =====

#[test]
fn test_build_without_repository_fails() {
    let result = AppStateBuilder::new().build();
    assert!(matches!(result, Err(CoreError::ValidationError(_))));
}

#[tokio::test]
async fn test_build_with_default_probes() {
    let (store, _tmp) = create_test_sqlite_store().await;
    let state = AppStateBuilder::new()
        .domain_repository(store)
        .build()
        .unwrap();

    assert!(state.domain_service.list_domains().await.unwrap().is_empty());
}

// ===== Workflow =====

#[tokio::test]
async fn test_add_refresh_delete_flow() {
    let (store, _tmp) = create_test_sqlite_store().await;
    let cert = certificate_probe();
    let state = AppStateBuilder::new()
        .domain_repository(store.clone())
        .certificate_probe(cert.clone())
        .whois_probe(Arc::new(FixedWhoisProbe))
        .build()
        .unwrap();

    let added = state
        .domain_service
        .add_domains("www.example.com\n\nbroken.invalid\n")
        .await;
    assert_eq!(added.len(), 2);

    let all = state.domain_service.list_domains().await.unwrap();
    let names: Vec<_> = all.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["broken.invalid", "www.example.com"]);
    assert!(all[0].last_check.is_none());
    assert_eq!(
        all[1].domain_expiry,
        Some(Utc.with_ymd_and_hms(2026, 8, 13, 4, 0, 0).unwrap())
    );

    let summary = state.domain_service.refresh_all().await.unwrap();
    assert_eq!(summary.refreshed, 1);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].name, "broken.invalid");
    assert_eq!(cert.calls.load(Ordering::SeqCst), 4);

    state.domain_service.delete_domain(all[0].id).await.unwrap();
    assert_eq!(store.find_all().await.unwrap().len(), 1);
}
