//! expiry-watch Core Library
//!
//! Business logic for tracking domain expiry dates:
//! - Expiry Resolver (leaf TLS certificate + WHOIS registration expiry)
//! - Domain Service (add / delete / refresh / list tracked domains)
//!
//! Storage and network access are abstracted through traits so the
//! resolver and the workflow can run against mocks.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult, ToolboxError};
pub use services::{DomainService, ExpiryResolver, ServiceContext};
pub use traits::{CertificateProbe, DomainRepository, WhoisProbe};
