//! 到期时间解析服务
//!
//! Certificate first, then WHOIS. The first failure is returned as is and
//! nothing after it runs.

use std::sync::Arc;

use expiry_watch_toolbox::ToolboxService;

use crate::error::CoreResult;
use crate::traits::{CertificateProbe, WhoisProbe};
use crate::types::ExpiryResult;

/// Resolves both expiry dates of a single domain.
pub struct ExpiryResolver {
    certificate_probe: Arc<dyn CertificateProbe>,
    whois_probe: Arc<dyn WhoisProbe>,
}

impl ExpiryResolver {
    #[must_use]
    pub fn new(
        certificate_probe: Arc<dyn CertificateProbe>,
        whois_probe: Arc<dyn WhoisProbe>,
    ) -> Self {
        Self {
            certificate_probe,
            whois_probe,
        }
    }

    /// Resolve the leaf certificate expiry and the registration expiry of `domain`.
    ///
    /// A TLS failure returns before any WHOIS traffic. A WHOIS failure discards
    /// the certificate expiry already obtained.
    pub async fn resolve(&self, domain: &str) -> CoreResult<ExpiryResult> {
        let domain = domain.trim();

        let chain = self.certificate_probe.peer_chain(domain).await?;
        let cert_expiry = ToolboxService::leaf_expiry(&chain)?;
        log::debug!("[Resolver] {domain}: certificate expires {cert_expiry}");

        let registrable = ToolboxService::registrable_domain(domain)?;
        let raw = self.whois_probe.query(&registrable).await?;
        let domain_expiry = ToolboxService::parse_whois_expiry(&raw)?;
        log::debug!("[Resolver] {domain}: registration ({registrable}) expires {domain_expiry}");

        Ok(ExpiryResult {
            cert_expiry,
            domain_expiry,
        })
    }
}
