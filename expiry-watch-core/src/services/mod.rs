//! 业务逻辑服务层

mod domain_service;
mod expiry_resolver;
mod toolbox;

pub use domain_service::DomainService;
pub use expiry_resolver::ExpiryResolver;
#[cfg(feature = "rustls")]
pub use toolbox::ToolboxCertificateProbe;
pub use toolbox::ToolboxWhoisProbe;

use std::sync::Arc;

use crate::traits::{CertificateProbe, DomainRepository, WhoisProbe};

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入存储实现与网络探针。
pub struct ServiceContext {
    /// 监控域名仓库
    pub domain_repository: Arc<dyn DomainRepository>,
    /// TLS 证书探针
    pub certificate_probe: Arc<dyn CertificateProbe>,
    /// WHOIS 探针
    pub whois_probe: Arc<dyn WhoisProbe>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        domain_repository: Arc<dyn DomainRepository>,
        certificate_probe: Arc<dyn CertificateProbe>,
        whois_probe: Arc<dyn WhoisProbe>,
    ) -> Self {
        Self {
            domain_repository,
            certificate_probe,
            whois_probe,
        }
    }

    /// Resolver wired to this context's probes.
    #[must_use]
    pub fn resolver(&self) -> ExpiryResolver {
        ExpiryResolver::new(
            Arc::clone(&self.certificate_probe),
            Arc::clone(&self.whois_probe),
        )
    }
}
