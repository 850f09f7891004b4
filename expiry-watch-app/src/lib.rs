//! Application bootstrap for expiry-watch.
//!
//! Provides `AppState` (service container) and `AppStateBuilder` (adapter
//! injection). The SQLite store lives in [`adapters`].

pub mod adapters;

use std::sync::Arc;

use expiry_watch_core::error::{CoreError, CoreResult};
#[cfg(feature = "rustls")]
use expiry_watch_core::services::ToolboxCertificateProbe;
use expiry_watch_core::services::{DomainService, ServiceContext, ToolboxWhoisProbe};
use expiry_watch_core::traits::{CertificateProbe, DomainRepository, WhoisProbe};
use expiry_watch_core::types::ProbeTimeouts;

/// Application state shared by every request handler.
///
/// Constructed once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Domain service
    pub domain_service: DomainService,
}

/// Builder for constructing `AppState` with concrete adapters.
///
/// # Required adapters
/// - `domain_repository`: where tracked domains are stored
///
/// # Optional
/// - `certificate_probe`: defaults to the rustls probe using `probe_timeouts`
/// - `whois_probe`: defaults to `ToolboxWhoisProbe`
pub struct AppStateBuilder {
    domain_repository: Option<Arc<dyn DomainRepository>>,
    certificate_probe: Option<Arc<dyn CertificateProbe>>,
    whois_probe: Option<Arc<dyn WhoisProbe>>,
    probe_timeouts: ProbeTimeouts,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            domain_repository: None,
            certificate_probe: None,
            whois_probe: None,
            probe_timeouts: ProbeTimeouts::default(),
        }
    }

    #[must_use]
    pub fn domain_repository(mut self, repo: Arc<dyn DomainRepository>) -> Self {
        self.domain_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn certificate_probe(mut self, probe: Arc<dyn CertificateProbe>) -> Self {
        self.certificate_probe = Some(probe);
        self
    }

    #[must_use]
    pub fn whois_probe(mut self, probe: Arc<dyn WhoisProbe>) -> Self {
        self.whois_probe = Some(probe);
        self
    }

    /// Timeouts for the default certificate probe. Ignored when a probe is injected.
    #[must_use]
    pub fn probe_timeouts(mut self, timeouts: ProbeTimeouts) -> Self {
        self.probe_timeouts = timeouts;
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let domain_repository = self.domain_repository.ok_or_else(|| {
            CoreError::ValidationError("domain_repository is required".to_string())
        })?;
        let certificate_probe = match self.certificate_probe {
            Some(probe) => probe,
            None => default_certificate_probe(self.probe_timeouts)?,
        };
        let whois_probe = self
            .whois_probe
            .unwrap_or_else(|| Arc::new(ToolboxWhoisProbe));

        let ctx = Arc::new(ServiceContext::new(
            domain_repository,
            certificate_probe,
            whois_probe,
        ));
        Ok(AppState {
            domain_service: DomainService::new(ctx),
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "rustls")]
#[allow(clippy::unnecessary_wraps)]
fn default_certificate_probe(timeouts: ProbeTimeouts) -> CoreResult<Arc<dyn CertificateProbe>> {
    Ok(Arc::new(ToolboxCertificateProbe::new(timeouts)))
}

#[cfg(not(feature = "rustls"))]
fn default_certificate_probe(_timeouts: ProbeTimeouts) -> CoreResult<Arc<dyn CertificateProbe>> {
    Err(CoreError::ValidationError(
        "certificate_probe is required without the rustls feature".to_string(),
    ))
}
