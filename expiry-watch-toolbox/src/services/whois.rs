//! WHOIS fetching and expiry extraction.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::{debug, trace};
use whois_rust::{WhoIs, WhoIsLookupOptions};

use super::date::parse_date;
use crate::error::{ToolboxError, ToolboxResult};

/// Line markers that announce a registration expiry, lower-case.
const EXPIRY_MARKERS: [&str; 4] = [
    "expiry date",
    "expiration date",
    "expires on",
    "registrar registration expiration date",
];

/// Server asked when no suffix of the domain is in the server map. Its
/// `refer:` line is followed to the registry server.
pub const IANA_WHOIS_SERVER: &str = "whois.iana.org";

/// Longest suffix of `domain` (`co.uk`, then `uk`) that has an entry in the server map.
pub fn mapped_suffix(domain: &str, whois_servers: &str) -> ToolboxResult<Option<String>> {
    let servers: HashMap<String, serde_json::Value> = serde_json::from_str(whois_servers)
        .map_err(|e| {
            ToolboxError::WhoisRequestFailed(format!("Invalid WHOIS server map: {e}"))
        })?;

    let domain = domain.trim().trim_end_matches('.').to_lowercase();
    let mut suffix = domain.as_str();
    while let Some((_, rest)) = suffix.split_once('.') {
        if servers.contains_key(rest) {
            return Ok(Some(rest.to_string()));
        }
        suffix = rest;
    }
    Ok(None)
}

/// Query the WHOIS service responsible for `registrable_domain` and return the raw answer.
///
/// Domains under a TLD missing from `whois_servers` are sent to IANA.
pub async fn whois_query(registrable_domain: &str, whois_servers: &str) -> ToolboxResult<String> {
    let whois = match mapped_suffix(registrable_domain, whois_servers)? {
        Some(suffix) => {
            trace!("[WHOIS] {registrable_domain}: server mapped for .{suffix}");
            WhoIs::from_string(whois_servers)
        }
        None => {
            debug!("[WHOIS] {registrable_domain}: no mapped server, asking {IANA_WHOIS_SERVER}");
            WhoIs::from_host(IANA_WHOIS_SERVER)
        }
    }
    .map_err(|e| {
        ToolboxError::WhoisRequestFailed(format!("Failed to initialize WHOIS client: {e}"))
    })?;

    let options = WhoIsLookupOptions::from_string(registrable_domain)
        .map_err(|e| ToolboxError::InvalidDomain(format!("{registrable_domain}: {e}")))?;

    debug!("[WHOIS] Querying {registrable_domain}");
    let raw = whois
        .lookup_async(options)
        .await
        .map_err(|e| ToolboxError::WhoisRequestFailed(format!("{registrable_domain}: {e}")))?;

    trace!("[WHOIS] {registrable_domain}: {} bytes", raw.len());
    Ok(raw)
}

/// Find the registration expiry in a raw WHOIS answer.
///
/// The first line that contains an expiry marker, has a `:` separator and
/// whose value parses under a known layout wins. Lines that match a marker
/// but fail to parse are skipped.
pub fn parse_whois_expiry(raw: &str) -> ToolboxResult<DateTime<Utc>> {
    for line in raw.lines() {
        let lower = line.to_lowercase();
        if !EXPIRY_MARKERS.iter().any(|marker| lower.contains(marker)) {
            continue;
        }

        let Some((_, value)) = line.split_once(':') else {
            trace!("[WHOIS] Marker line without separator: {line}");
            continue;
        };

        match parse_date(value.trim()) {
            Ok(expiry) => return Ok(expiry),
            Err(e) => debug!("[WHOIS] Skipping unparseable expiry line: {e}"),
        }
    }

    Err(ToolboxError::ExpiryNotFound)
}
