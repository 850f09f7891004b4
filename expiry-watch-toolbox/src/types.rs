//! Public types returned by toolbox operations.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default TCP connect timeout for certificate inspection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default TLS handshake timeout for certificate inspection.
pub const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

/// One certificate of a peer chain, reduced to what expiry tracking needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerCertificate {
    /// Basic constraints `cA` flag.
    pub is_ca: bool,
    /// End of the validity period.
    pub not_after: DateTime<Utc>,
}

impl PeerCertificate {
    #[must_use]
    pub fn new(is_ca: bool, not_after: DateTime<Utc>) -> Self {
        Self { is_ca, not_after }
    }
}

/// Transport timeouts applied while dialing a TLS peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTimeouts {
    /// Upper bound for the TCP connect.
    pub connect: Duration,
    /// Upper bound for the TLS handshake.
    pub handshake: Duration,
}

impl Default for ProbeTimeouts {
    fn default() -> Self {
        Self {
            connect: DEFAULT_CONNECT_TIMEOUT,
            handshake: DEFAULT_HANDSHAKE_TIMEOUT,
        }
    }
}
