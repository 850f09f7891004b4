//! Probe implementations backed by the toolbox crate.

use async_trait::async_trait;

use expiry_watch_toolbox::{ToolboxResult, ToolboxService};

use crate::traits::WhoisProbe;
#[cfg(feature = "rustls")]
use crate::{
    traits::CertificateProbe,
    types::{PeerCertificate, ProbeTimeouts},
};

/// Dials the real host with rustls.
#[cfg(feature = "rustls")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolboxCertificateProbe {
    timeouts: ProbeTimeouts,
}

#[cfg(feature = "rustls")]
impl ToolboxCertificateProbe {
    #[must_use]
    pub fn new(timeouts: ProbeTimeouts) -> Self {
        Self { timeouts }
    }
}

#[cfg(feature = "rustls")]
#[async_trait]
impl CertificateProbe for ToolboxCertificateProbe {
    async fn peer_chain(&self, host: &str) -> ToolboxResult<Vec<PeerCertificate>> {
        ToolboxService::peer_chain(host, self.timeouts).await
    }
}

/// Queries the WHOIS server for the domain's TLD over port 43.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolboxWhoisProbe;

#[async_trait]
impl WhoisProbe for ToolboxWhoisProbe {
    async fn query(&self, registrable_domain: &str) -> ToolboxResult<String> {
        ToolboxService::whois_query(registrable_domain).await
    }
}
