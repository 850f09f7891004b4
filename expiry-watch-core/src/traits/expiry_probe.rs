//! Network capabilities used by the expiry resolver.
//!
//! The resolver only talks to the network through these traits, so tests can
//! substitute scripted probes and count calls.

use async_trait::async_trait;

use crate::types::PeerCertificate;
use expiry_watch_toolbox::ToolboxResult;

/// TLS capability: dial `host:443` and report the peer chain in presented order.
#[async_trait]
pub trait CertificateProbe: Send + Sync {
    async fn peer_chain(&self, host: &str) -> ToolboxResult<Vec<PeerCertificate>>;
}

/// WHOIS capability: raw answer for an already reduced registrable domain.
#[async_trait]
pub trait WhoisProbe: Send + Sync {
    async fn query(&self, registrable_domain: &str) -> ToolboxResult<String>;
}
