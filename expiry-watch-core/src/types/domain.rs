//! 监控域名类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ExpiryResult;
use crate::utils::datetime;

/// A tracked domain and the last expiry values resolved for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRecord {
    /// Storage identifier
    pub id: i64,
    /// Host name as entered (unique)
    pub name: String,
    /// Leaf certificate expiry (unset until the first successful refresh)
    #[serde(default, with = "datetime::option")]
    pub cert_expiry: Option<DateTime<Utc>>,
    /// Registration expiry (unset until the first successful refresh)
    #[serde(default, with = "datetime::option")]
    pub domain_expiry: Option<DateTime<Utc>>,
    /// Time of the last successful refresh
    #[serde(default, with = "datetime::option")]
    pub last_check: Option<DateTime<Utc>>,
}

impl DomainRecord {
    /// A record that has never been refreshed.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            cert_expiry: None,
            domain_expiry: None,
            last_check: None,
        }
    }

    /// Whether a refresh has ever succeeded for this record.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.last_check.is_some()
    }

    /// Apply an update in place; all three fields move together.
    pub fn apply(&mut self, update: &ExpiryUpdate) {
        self.cert_expiry = Some(update.cert_expiry);
        self.domain_expiry = Some(update.domain_expiry);
        self.last_check = Some(update.last_check);
    }
}

/// Fields written after a successful resolution.
///
/// There is no partial form: the store writes all three or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryUpdate {
    pub cert_expiry: DateTime<Utc>,
    pub domain_expiry: DateTime<Utc>,
    pub last_check: DateTime<Utc>,
}

impl ExpiryUpdate {
    #[must_use]
    pub fn new(result: ExpiryResult, checked_at: DateTime<Utc>) -> Self {
        Self {
            cert_expiry: result.cert_expiry,
            domain_expiry: result.domain_expiry,
            last_check: checked_at,
        }
    }
}

/// One domain that could not be refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshFailure {
    pub name: String,
    pub error: String,
}

/// Outcome of refreshing every tracked domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummary {
    /// Number of records updated
    pub refreshed: usize,
    /// Records left untouched, in processing order
    pub failed: Vec<RefreshFailure>,
}

impl RefreshSummary {
    /// Total number of records attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.refreshed + self.failed.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_apply_moves_all_fields_together() {
        let mut record = DomainRecord::new(1, "example.com");
        assert!(!record.is_checked());

        let result = ExpiryResult {
            cert_expiry: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
            domain_expiry: Utc.with_ymd_and_hms(2026, 8, 13, 4, 0, 0).unwrap(),
        };
        let checked_at = Utc.with_ymd_and_hms(2024, 12, 1, 10, 0, 0).unwrap();
        record.apply(&ExpiryUpdate::new(result, checked_at));

        assert_eq!(record.cert_expiry, Some(result.cert_expiry));
        assert_eq!(record.domain_expiry, Some(result.domain_expiry));
        assert_eq!(record.last_check, Some(checked_at));
        assert!(record.is_checked());
    }

    #[test]
    fn test_record_json_roundtrip_with_unset_dates() {
        let record = DomainRecord::new(3, "example.org");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"certExpiry\":null"));
        let back: DomainRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_record_json_uses_rfc3339() {
        let mut record = DomainRecord::new(4, "example.net");
        record.cert_expiry = Some(Utc.with_ymd_and_hms(2025, 1, 2, 15, 4, 5).unwrap());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["certExpiry"], "2025-01-02T15:04:05+00:00");
    }

    #[test]
    fn test_summary_attempted() {
        let summary = RefreshSummary {
            refreshed: 2,
            failed: vec![RefreshFailure {
                name: "broken.example".into(),
                error: "TLS connection failed: refused".into(),
            }],
        };
        assert_eq!(summary.attempted(), 3);
    }
}
