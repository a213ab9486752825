//! Transfer engine
//!
//! Runs one download, upload or listing: opens a passive data channel,
//! streams the bytes, closes the channel and then reads the server's
//! completion reply on the control channel.

use std::path::Path;

use log::{debug, info};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};

use crate::client::Session;
use crate::error::{FtpsClientError, Result};
use crate::protocol::{Command, Response};
use crate::transfer::data_channel::open_passive_channel;
use crate::transfer::results::{Listing, TransferSummary};

const BUFFER_SIZE: usize = 8192; // 8KB buffer, same for both directions

/// Retrieves `remote_path` into `local_path`, creating or truncating it.
///
/// A partially written local file is left in place on failure.
pub async fn download(
    session: &mut Session,
    remote_path: &str,
    local_path: &Path,
) -> Result<TransferSummary> {
    session.configure_transfer_mode().await?;
    let (mut channel, _) =
        open_passive_channel(session, &Command::Retr(remote_path.to_string())).await?;

    let mut file = File::create(local_path).await.map_err(FtpsClientError::Io)?;
    info!("Downloading {} -> {}", remote_path, local_path.display());

    let mut buffer = vec![0u8; BUFFER_SIZE];
    let mut total = 0u64;
    loop {
        let n = channel
            .stream_mut()
            .read(&mut buffer)
            .await
            .map_err(FtpsClientError::Transport)?;
        if n == 0 {
            break;
        }
        file.write_all(&buffer[..n])
            .await
            .map_err(FtpsClientError::Io)?;
        total += n as u64;
    }
    file.flush().await.map_err(FtpsClientError::Io)?;
    channel.close().await;
    debug!("Received {} bytes for {}", total, remote_path);

    let final_response = completion(session).await?;
    Ok(TransferSummary {
        bytes: total,
        final_response,
    })
}

/// Stores the contents of `local_path` at `remote_path`.
pub async fn upload(
    session: &mut Session,
    local_path: &Path,
    remote_path: &str,
) -> Result<TransferSummary> {
    session.configure_transfer_mode().await?;
    let mut file = File::open(local_path).await.map_err(FtpsClientError::Io)?;
    let (mut channel, _) =
        open_passive_channel(session, &Command::Stor(remote_path.to_string())).await?;
    info!("Uploading {} -> {}", local_path.display(), remote_path);

    let mut buffer = vec![0u8; BUFFER_SIZE];
    let mut total = 0u64;
    loop {
        let n = file.read(&mut buffer).await.map_err(FtpsClientError::Io)?;
        if n == 0 {
            break;
        }
        channel
            .stream_mut()
            .write_all(&buffer[..n])
            .await
            .map_err(FtpsClientError::Transport)?;
        total += n as u64;
    }
    channel.finish().await?;
    debug!("Sent {} bytes for {}", total, remote_path);

    let final_response = completion(session).await?;
    Ok(TransferSummary {
        bytes: total,
        final_response,
    })
}

/// Lists `remote_path`, handing each line to `sink` as it arrives.
///
/// Lines are server-defined text and are passed through unparsed.
pub async fn list<F>(session: &mut Session, remote_path: &str, mut sink: F) -> Result<Listing>
where
    F: FnMut(&str),
{
    let (mut channel, _) =
        open_passive_channel(session, &Command::List(remote_path.to_string())).await?;
    let peer = channel.peer();

    let mut reader = BufReader::new(channel.stream_mut());
    let mut lines = Vec::new();
    let mut raw = Vec::new();
    loop {
        raw.clear();
        let n = reader
            .read_until(b'\n', &mut raw)
            .await
            .map_err(FtpsClientError::Transport)?;
        if n == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&raw)
            .trim_end_matches(['\r', '\n'])
            .to_string();
        sink(&line);
        lines.push(line);
    }
    drop(reader);
    channel.close().await;
    debug!("Listing from {} had {} lines", peer, lines.len());

    let final_response = completion(session).await?;
    Ok(Listing {
        lines,
        final_response,
    })
}

/// Reads the reply that ends a transfer; a failure class aborts.
async fn completion(session: &mut Session) -> Result<Response> {
    let response = session.read_response().await?;
    if response.is_failure() {
        return Err(FtpsClientError::Operation(response));
    }
    Ok(response)
}
