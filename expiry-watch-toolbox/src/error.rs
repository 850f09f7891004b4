//! 统一错误类型定义

use serde::Serialize;
use thiserror::Error;

/// Failure kinds of the expiry probes.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ToolboxError {
    /// TCP connect, TLS handshake or certificate validation failed.
    #[error("TLS connection failed: {0}")]
    TlsConnectFailed(String),

    /// The peer presented only CA certificates (or none at all).
    #[error("No leaf certificate in peer chain")]
    NoLeafCertificate,

    /// The host cannot be reduced to a registrable domain.
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    /// WHOIS transport or protocol failure.
    #[error("WHOIS request failed: {0}")]
    WhoisRequestFailed(String),

    /// WHOIS answered, but no marker line carried a parseable date.
    #[error("Expiry date not found in WHOIS data")]
    ExpiryNotFound,

    /// Date parser failure; the extractor folds it into `ExpiryNotFound`.
    #[error("No date layout matched: {0}")]
    NoLayoutMatched(String),
}

impl ToolboxError {
    /// Whether the error stems from the input or the remote data rather than the transport.
    ///
    /// Callers log `true` at `warn` and `false` at `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidDomain(_) | Self::ExpiryNotFound | Self::NoLayoutMatched(_)
        )
    }
}

/// 工具箱 Result 类型别名
pub type ToolboxResult<T> = std::result::Result<T, ToolboxError>;
