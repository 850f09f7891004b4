//! TLS certificate inspection.
//!
//! Dials the host with rustls, validates the chain against the Mozilla root
//! set and reports every certificate the peer presents.

use std::sync::Arc;

use chrono::DateTime;
use log::{debug, trace, warn};
use rustls::crypto::CryptoProvider;
use rustls::{ClientConfig, RootCertStore};
use rustls_pki_types::{CertificateDer, ServerName};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_rustls::TlsConnector;
use x509_parser::prelude::*;

use crate::error::{ToolboxError, ToolboxResult};
use crate::types::{PeerCertificate, ProbeTimeouts};

/// Initialize the rustls `CryptoProvider` (once).
///
/// `install_default` returns `Err` when a provider is already installed,
/// which is fine.
fn ensure_crypto_provider() {
    let _ = CryptoProvider::install_default(rustls::crypto::ring::default_provider());
}

/// Connect to `domain:port` and return the peer chain in presented order.
///
/// Every connection, resolution, handshake or validation failure is reported
/// as [`ToolboxError::TlsConnectFailed`]. The stream is dropped before
/// returning on every path.
pub async fn peer_chain(
    domain: &str,
    port: u16,
    timeouts: ProbeTimeouts,
) -> ToolboxResult<Vec<PeerCertificate>> {
    ensure_crypto_provider();

    debug!("[SSL] Dialing {domain}:{port}");
    let start_time = std::time::Instant::now();

    let stream = match timeout(timeouts.connect, TcpStream::connect((domain, port))).await {
        Ok(Ok(s)) => s,
        Ok(Err(e)) => {
            warn!("[SSL] TCP connection to {domain} failed: {e}");
            return Err(ToolboxError::TlsConnectFailed(format!(
                "Connection failed: {e}"
            )));
        }
        Err(_) => {
            warn!(
                "[SSL] TCP connection to {domain} timed out ({}s)",
                timeouts.connect.as_secs()
            );
            return Err(ToolboxError::TlsConnectFailed(
                "Connection timed out".to_string(),
            ));
        }
    };
    trace!("[SSL] TCP connected in {:?}", start_time.elapsed());

    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    let connector = TlsConnector::from(Arc::new(config));

    let server_name = ServerName::try_from(domain.to_string())
        .map_err(|_| ToolboxError::TlsConnectFailed(format!("Invalid server name: {domain}")))?;

    let tls_stream = match timeout(timeouts.handshake, connector.connect(server_name, stream)).await
    {
        Ok(Ok(s)) => s,
        Ok(Err(e)) => {
            warn!("[SSL] TLS handshake with {domain} failed: {e}");
            return Err(ToolboxError::TlsConnectFailed(format!(
                "TLS handshake failed: {e}"
            )));
        }
        Err(_) => {
            warn!(
                "[SSL] TLS handshake with {domain} timed out ({}s)",
                timeouts.handshake.as_secs()
            );
            return Err(ToolboxError::TlsConnectFailed(
                "TLS handshake timed out".to_string(),
            ));
        }
    };

    let (_, tls_conn) = tls_stream.get_ref();
    let chain = chain_from_der(tls_conn.peer_certificates().unwrap_or_default())?;

    debug!(
        "[SSL] {domain}: {} certificate(s) in chain, total time {:?}",
        chain.len(),
        start_time.elapsed()
    );

    Ok(chain)
}

/// Convert the presented certificates, keeping their order.
fn chain_from_der(certs: &[CertificateDer<'_>]) -> ToolboxResult<Vec<PeerCertificate>> {
    certs.iter().map(to_peer_certificate).collect()
}

/// A presented certificate that cannot be read fails the whole probe, so a
/// later certificate is never mistaken for the leaf.
fn to_peer_certificate(der: &CertificateDer<'_>) -> ToolboxResult<PeerCertificate> {
    let (_, parsed) = X509Certificate::from_der(der.as_ref()).map_err(|e| {
        warn!("[SSL] Certificate parsing failed: {e}");
        ToolboxError::TlsConnectFailed(format!("Unreadable peer certificate: {e}"))
    })?;

    let not_after = DateTime::from_timestamp(parsed.validity().not_after.timestamp(), 0)
        .ok_or_else(|| {
            ToolboxError::TlsConnectFailed("Peer certificate expiry out of range".to_string())
        })?;
    Ok(PeerCertificate::new(parsed.is_ca(), not_after))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::services::certificate::leaf_expiry;

    #[test]
    fn test_to_peer_certificate_rejects_garbage() {
        let der = CertificateDer::from(vec![0x30, 0x03, 0x02, 0x01, 0x00]);
        assert!(matches!(
            to_peer_certificate(&der),
            Err(ToolboxError::TlsConnectFailed(_))
        ));
    }

    #[test]
    fn test_unreadable_first_certificate_fails_chain() {
        let garbage = CertificateDer::from(vec![0x30, 0x03, 0x02, 0x01, 0x00]);
        let result = chain_from_der(&[garbage.clone(), garbage]);
        assert!(matches!(result, Err(ToolboxError::TlsConnectFailed(_))));
    }

    #[test]
    fn test_empty_presented_chain() {
        assert!(chain_from_der(&[]).unwrap().is_empty());
    }

    // ==================== integration tests ====================

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_peer_chain_real() {
        let chain = peer_chain("google.com", 443, ProbeTimeouts::default())
            .await
            .unwrap_or_else(|e| panic!("TLS dial failed: {e}"));
        assert!(!chain.is_empty());
        let expiry = leaf_expiry(&chain).expect("leaf certificate expected");
        assert!(expiry > Utc::now());
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_peer_chain_unresolvable_host_real() {
        let result = peer_chain(
            "this-domain-does-not-exist-12345.com",
            443,
            ProbeTimeouts::default(),
        )
        .await;
        assert!(matches!(result, Err(ToolboxError::TlsConnectFailed(_))));
    }
}
