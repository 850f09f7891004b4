//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export probe error type
pub use expiry_watch_toolbox::{ToolboxError, ToolboxResult};

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Tracked domain not found
    #[error("Domain not found: {0}")]
    DomainNotFound(i64),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Expiry resolution error (converted from the toolbox)
    #[error("{0}")]
    Expiry(#[from] ToolboxError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, missing record, unparseable WHOIS data);
    /// used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::DomainNotFound(_) | Self::ValidationError(_) => true,
            Self::Expiry(e) => e.is_expected(),
            _ => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_expected_classification() {
        assert!(CoreError::DomainNotFound(7).is_expected());
        assert!(CoreError::Expiry(ToolboxError::ExpiryNotFound).is_expected());
        assert!(!CoreError::Expiry(ToolboxError::TlsConnectFailed("refused".into())).is_expected());
        assert!(!CoreError::StorageError("disk full".into()).is_expected());
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_value(CoreError::Expiry(ToolboxError::NoLeafCertificate))
            .unwrap_or_default();
        assert_eq!(json["code"], "Expiry");
        assert_eq!(json["details"]["code"], "NoLeafCertificate");
    }

    #[test]
    fn test_display_passes_through_toolbox_message() {
        let err = CoreError::from(ToolboxError::InvalidDomain("com is a public suffix".into()));
        assert_eq!(err.to_string(), "Invalid domain: com is a public suffix");
    }
}
