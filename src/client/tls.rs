//! TLS helpers for explicit FTPS.
//!
//! One connector is built per session and reused for the control channel
//! upgrade and every data channel; the session's hostname is the identity
//! verified on each handshake.

use log::{debug, warn};
use tokio::net::TcpStream;
use tokio_native_tls::{TlsConnector, TlsStream};

use crate::config::ClientConfig;
use crate::error::{FtpsClientError, Result};

/// Build a `TlsConnector` according to the client configuration.
pub async fn build_tls_connector(config: &ClientConfig) -> Result<TlsConnector> {
    let mut builder = native_tls::TlsConnector::builder();

    if let Some(path) = config.ca_certificate_path() {
        let pem = tokio::fs::read(&path).await.map_err(FtpsClientError::Io)?;
        let cert = native_tls::Certificate::from_pem(&pem)?;
        builder.add_root_certificate(cert);
        debug!("Trusting extra CA certificate {}", path.display());
    }

    if config.accept_invalid_certs {
        warn!("Certificate and hostname verification disabled");
        builder.danger_accept_invalid_certs(true);
        builder.danger_accept_invalid_hostnames(true);
    }

    Ok(TlsConnector::from(builder.build()?))
}

/// Run a client handshake over an already connected socket.
pub async fn handshake(
    connector: &TlsConnector,
    host: &str,
    stream: TcpStream,
) -> Result<TlsStream<TcpStream>> {
    let tls = connector.connect(host, stream).await?;
    debug!("TLS established with {}", host);
    Ok(tls)
}
