//! Registrable-domain reduction ("effective TLD + 1") via the public suffix list.

use crate::error::{ToolboxError, ToolboxResult};

/// Reduce a host name to the domain a registrar actually sells.
///
/// `www.example.co.uk` becomes `example.co.uk`. Bare public suffixes
/// (`com`, `co.uk`) and single labels have no registrable part and fail.
pub fn registrable_domain(host: &str) -> ToolboxResult<String> {
    let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
    if host.is_empty() {
        return Err(ToolboxError::InvalidDomain(
            "Domain name is required".to_string(),
        ));
    }

    let name = addr::parse_domain_name(&host)
        .map_err(|e| ToolboxError::InvalidDomain(format!("{host}: {e}")))?;

    name.root()
        .map(str::to_string)
        .ok_or_else(|| ToolboxError::InvalidDomain(format!("{host} is a public suffix")))
}
