//! Expiry resolution output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Both expiry dates of one domain, produced together by a single resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryResult {
    /// `notAfter` of the leaf TLS certificate
    #[serde(with = "crate::utils::datetime")]
    pub cert_expiry: DateTime<Utc>,
    /// Registration expiry reported by WHOIS
    #[serde(with = "crate::utils::datetime")]
    pub domain_expiry: DateTime<Utc>,
}
