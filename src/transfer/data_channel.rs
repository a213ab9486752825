//! Module `data_channel`
//!
//! Negotiates passive-mode data connections. The client asks for an
//! address with PASV, connects to it, sends the transfer command on the
//! control channel and only then upgrades the data socket to TLS, using
//! the same server identity as the control channel.

use log::{debug, info, warn};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_native_tls::TlsStream;

use crate::client::{Session, tls};
use crate::error::{FtpsClientError, Result};
use crate::protocol::{Command, PassiveAddress, Response, parse_passive_response};

/// An encrypted data connection scoped to one transfer or listing.
pub struct DataChannel {
    stream: TlsStream<TcpStream>,
    peer: PassiveAddress,
}

impl DataChannel {
    pub fn peer(&self) -> PassiveAddress {
        self.peer
    }

    pub fn stream_mut(&mut self) -> &mut TlsStream<TcpStream> {
        &mut self.stream
    }

    /// Sends TLS close_notify and shuts down the write side, signalling
    /// end of data to the server. Required after an upload.
    pub async fn finish(mut self) -> Result<()> {
        self.stream
            .shutdown()
            .await
            .map_err(FtpsClientError::Transport)?;
        debug!("Data channel to {} finished", self.peer);
        Ok(())
    }

    /// Closes the channel after the server has ended the stream.
    pub async fn close(mut self) {
        if let Err(e) = self.stream.shutdown().await {
            debug!("Data channel to {} closed uncleanly: {}", self.peer, e);
        } else {
            debug!("Data channel to {} closed", self.peer);
        }
    }
}

/// Opens a passive data channel for `command` (LIST, RETR or STOR).
///
/// Returns the secured channel and the server's preliminary reply to
/// `command`. A failure reply closes the fresh socket untouched and
/// surfaces as `FtpsClientError::Operation`.
pub async fn open_passive_channel(
    session: &mut Session,
    command: &Command,
) -> Result<(DataChannel, Response)> {
    let pasv = session.execute(&Command::Pasv).await?;
    let peer = parse_passive_response(&pasv.to_string())?;

    debug!("Opening data connection to {}", peer);
    let tcp = TcpStream::connect(peer.socket_addr())
        .await
        .map_err(FtpsClientError::Transport)?;

    session.send(command).await?;
    let response = session.read_response().await?;
    if response.is_failure() {
        warn!("{} refused: {}", command.keyword(), response);
        drop(tcp);
        return Err(FtpsClientError::Operation(response));
    }

    let stream = tls::handshake(session.tls_connector(), session.host(), tcp).await?;
    info!("Data channel to {} ready for {}", peer, command.keyword());
    Ok((DataChannel { stream, peer }, response))
}
