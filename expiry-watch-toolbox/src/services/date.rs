//! Registrar date parsing.
//!
//! WHOIS servers print dates in whatever layout the registry prefers. The
//! layouts below are tried in order and the first one that matches the whole
//! value wins.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{ToolboxError, ToolboxResult};

/// A single accepted layout.
#[derive(Debug, Clone, Copy)]
enum Layout {
    /// `2025-08-13T04:00:00+02:00`
    Rfc3339,
    /// `2025-08-13T04:00:00Z`
    IsoZulu,
    /// `2025-08-13 04:00:00 UTC`
    DateTimeZoneName,
    /// `2025-08-13 04:00:00+0800`
    DateTimeNumericOffset,
    /// `2025-08-13`
    IsoDate,
    /// `13-Aug-2025`
    DayMonthNameYear,
    /// `2025.08.13`
    DottedDate,
}

/// Priority order; first match wins.
const LAYOUTS: [Layout; 7] = [
    Layout::Rfc3339,
    Layout::IsoZulu,
    Layout::DateTimeZoneName,
    Layout::DateTimeNumericOffset,
    Layout::IsoDate,
    Layout::DayMonthNameYear,
    Layout::DottedDate,
];

impl Layout {
    fn parse(self, value: &str) -> Option<DateTime<Utc>> {
        match self {
            Self::Rfc3339 => parse_rfc3339(value),
            Self::IsoZulu => {
                if !matches_shape(value, "9999-99-99Th:99:99Z") {
                    return None;
                }
                NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%SZ")
                    .ok()
                    .map(|dt| dt.and_utc())
            }
            Self::DateTimeZoneName => parse_with_zone_name(value),
            Self::DateTimeNumericOffset => {
                if !matches_shape(value, "9999-99-99 h:99:99±9999") {
                    return None;
                }
                DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%z")
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            }
            Self::IsoDate => midnight(value, "9999-99-99", "%Y-%m-%d"),
            Self::DayMonthNameYear => midnight(value, "99-AAA-9999", "%d-%b-%Y"),
            Self::DottedDate => midnight(value, "9999.99.99", "%Y.%m.%d"),
        }
    }
}

/// Parse a trimmed date value against the known layouts.
pub fn parse_date(value: &str) -> ToolboxResult<DateTime<Utc>> {
    LAYOUTS
        .iter()
        .find_map(|layout| layout.parse(value))
        .ok_or_else(|| ToolboxError::NoLayoutMatched(value.to_string()))
}

/// Match the start of `value` against `shape` and return what is left.
///
/// In a shape `9` is one digit, `h` is one or two digits, `A` is one ASCII
/// letter and `±` is `+` or `-`. Any other character matches itself.
fn match_shape<'a>(value: &'a str, shape: &str) -> Option<&'a str> {
    let mut rest = value.as_bytes();
    for token in shape.chars() {
        let (&first, tail) = rest.split_first()?;
        rest = match token {
            '9' if first.is_ascii_digit() => tail,
            'h' if first.is_ascii_digit() => match tail.split_first() {
                Some((second, after)) if second.is_ascii_digit() => after,
                _ => tail,
            },
            'A' if first.is_ascii_alphabetic() => tail,
            '±' if first == b'+' || first == b'-' => tail,
            literal if u8::try_from(literal).is_ok_and(|b| b == first) => tail,
            _ => return None,
        };
    }
    // Only ASCII was consumed, so the offset is a char boundary.
    value.get(value.len() - rest.len()..)
}

fn matches_shape(value: &str, shape: &str) -> bool {
    match_shape(value, shape) == Some("")
}

/// `T` separated date and time, optional fraction, then `Z` or `±hh:mm`.
fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    let rest = match_shape(value, "9999-99-99Th:99:99")?;
    let zone = match rest.strip_prefix('.') {
        Some(fraction) => {
            let zone = fraction.trim_start_matches(|c: char| c.is_ascii_digit());
            if zone.len() == fraction.len() {
                return None;
            }
            zone
        }
        None => rest,
    };

    if zone == "Z" {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.fZ")
            .ok()
            .map(|dt| dt.and_utc())
    } else if matches_shape(zone, "±99:99") {
        DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%:z")
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    } else {
        None
    }
}

fn midnight(value: &str, shape: &str, fmt: &str) -> Option<DateTime<Utc>> {
    if !matches_shape(value, shape) {
        return None;
    }
    NaiveDate::parse_from_str(value, fmt)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// `YYYY-MM-DD HH:MM:SS ZONE`.
///
/// Zone abbreviations carry no reliable offset, so every accepted name is read
/// as UTC.
fn parse_with_zone_name(value: &str) -> Option<DateTime<Utc>> {
    let (date_time, zone) = value.rsplit_once(' ')?;
    if !is_zone_name(zone) || !matches_shape(date_time, "9999-99-99 h:99:99") {
        return None;
    }
    NaiveDateTime::parse_from_str(date_time, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc())
}

/// Three upper-case letters, or four or five ending in `T` (`CEST`, `AKDT`).
/// `WITA`, `ChST` and `MeST` are the exceptions.
fn is_zone_name(zone: &str) -> bool {
    if matches!(zone, "WITA" | "ChST" | "MeST") {
        return true;
    }
    if !zone.bytes().all(|b| b.is_ascii_uppercase()) {
        return false;
    }
    match zone.len() {
        3 => true,
        4 | 5 => zone.ends_with('T'),
        _ => false,
    }
}
