//! Timestamp helpers shared by the store, the web layer and serde.
//!
//! Stored and serialized timestamps are RFC3339 strings in UTC.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Storage form of a timestamp (`2025-01-02T15:04:05Z`).
#[must_use]
pub fn to_storage(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a stored RFC3339 value, normalised to UTC.
pub fn from_storage(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value.trim()).map(|dt| dt.with_timezone(&Utc))
}

/// Whole days from `now` until `expiry`, truncated toward zero.
///
/// Computed from whole hours, so 47 hours left is one day and
/// 23 hours past expiry is zero.
#[must_use]
pub fn days_left(expiry: &DateTime<Utc>, now: &DateTime<Utc>) -> i64 {
    (*expiry - *now).num_hours() / 24
}

/// Serializes `DateTime<Utc>` as an RFC3339 string.
pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339())
}

/// Deserializes `DateTime<Utc>` from an RFC3339 string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let s = String::deserialize(deserializer)?;
    from_storage(&s).map_err(|e| Error::custom(format!("Invalid RFC3339 timestamp: {e}")))
}

/// `Option<DateTime<Utc>>` serializer/deserializer helpers.
pub mod option {
    use super::{DateTime, Deserialize, Deserializer, Serializer, Utc, from_storage};

    /// Serializes `Option<DateTime<Utc>>` as RFC3339 or `null`.
    pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match dt {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes `Option<DateTime<Utc>>` from RFC3339 or `null`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        match Option::<String>::deserialize(deserializer)? {
            Some(s) => from_storage(&s)
                .map(Some)
                .map_err(|e| Error::custom(format!("Invalid RFC3339 timestamp: {e}"))),
            None => Ok(None),
        }
    }
}
