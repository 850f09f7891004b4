//! Expiry probes for expiry-watch
//!
//! Stateless network and parsing utilities: TLS leaf-certificate inspection,
//! registrable-domain reduction, WHOIS fetching and WHOIS expiry extraction.
//! Nothing here touches storage.

mod error;
mod services;
mod types;

pub use error::{ToolboxError, ToolboxResult};
pub use services::ToolboxService;
pub use types::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_HANDSHAKE_TIMEOUT, PeerCertificate, ProbeTimeouts};
