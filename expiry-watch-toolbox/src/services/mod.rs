//! Stateless service façade exposing all toolbox operations.
//!
//! Every method on [`ToolboxService`] is an associated function; no instance is needed.

mod certificate;
mod date;
mod domain;
#[cfg(feature = "rustls")]
mod ssl;
mod whois;

use chrono::{DateTime, Utc};

use crate::error::ToolboxResult;
use crate::types::PeerCertificate;
#[cfg(feature = "rustls")]
use crate::types::ProbeTimeouts;

/// Embedded WHOIS server mapping (TLD → server).
const WHOIS_SERVERS: &str = include_str!("whois_servers.json");

/// Port the certificate inspector dials.
pub const HTTPS_PORT: u16 = 443;

/// Entry point for all probe and parsing operations.
///
/// ```rust,no_run
/// use expiry_watch_toolbox::ToolboxService;
/// # async fn demo() -> expiry_watch_toolbox::ToolboxResult<()> {
/// let registrable = ToolboxService::registrable_domain("www.example.co.uk")?;
/// let raw = ToolboxService::whois_query(&registrable).await?;
/// let expiry = ToolboxService::parse_whois_expiry(&raw)?;
/// # Ok(())
/// # }
/// ```
pub struct ToolboxService;

impl ToolboxService {
    /// Dial `domain` on port 443 and return the validated peer chain.
    #[cfg(feature = "rustls")]
    pub async fn peer_chain(
        domain: &str,
        timeouts: ProbeTimeouts,
    ) -> ToolboxResult<Vec<PeerCertificate>> {
        ssl::peer_chain(domain.trim(), HTTPS_PORT, timeouts).await
    }

    /// Expiry of the first non-CA certificate of a chain.
    pub fn leaf_expiry(chain: &[PeerCertificate]) -> ToolboxResult<DateTime<Utc>> {
        certificate::leaf_expiry(chain)
    }

    /// Reduce a host name to its registrable domain (`www.example.co.uk` → `example.co.uk`).
    pub fn registrable_domain(host: &str) -> ToolboxResult<String> {
        domain::registrable_domain(host)
    }

    /// Raw WHOIS answer for an already reduced domain.
    pub async fn whois_query(registrable_domain: &str) -> ToolboxResult<String> {
        whois::whois_query(registrable_domain, WHOIS_SERVERS).await
    }

    /// Extract the registration expiry from a raw WHOIS answer.
    pub fn parse_whois_expiry(raw: &str) -> ToolboxResult<DateTime<Utc>> {
        whois::parse_whois_expiry(raw)
    }
}
