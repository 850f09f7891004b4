//! 类型定义模块

mod domain;
mod expiry;

pub use domain::{DomainRecord, ExpiryUpdate, RefreshFailure, RefreshSummary};
pub use expiry::ExpiryResult;

// Re-export probe types
pub use expiry_watch_toolbox::{PeerCertificate, ProbeTimeouts};
