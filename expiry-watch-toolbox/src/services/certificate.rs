//! Leaf selection over a presented certificate chain.

use chrono::{DateTime, Utc};

use crate::error::{ToolboxError, ToolboxResult};
use crate::types::PeerCertificate;

/// Expiry of the first non-CA certificate in presented order.
pub fn leaf_expiry(chain: &[PeerCertificate]) -> ToolboxResult<DateTime<Utc>> {
    chain
        .iter()
        .find(|cert| !cert.is_ca)
        .map(|cert| cert.not_after)
        .ok_or(ToolboxError::NoLeafCertificate)
}
