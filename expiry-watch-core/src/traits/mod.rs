//! Storage and probe abstraction trait definitions

mod domain_repository;
mod expiry_probe;

pub use domain_repository::DomainRepository;
pub use expiry_probe::{CertificateProbe, WhoisProbe};
