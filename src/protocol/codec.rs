//! Line protocol codec
//!
//! Writes CRLF-terminated command lines and reads newline-terminated
//! reply lines over any async byte stream (plain TCP or TLS).

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{FtpsClientError, ProtocolError, Result};

/// Upper bound on a single reply line.
pub const MAX_RESPONSE_LENGTH: usize = 8192;

/// Writes `text` followed by CRLF and flushes.
pub async fn write_command<W>(writer: &mut W, text: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let line = format!("{}\r\n", text);
    writer
        .write_all(line.as_bytes())
        .await
        .map_err(FtpsClientError::Transport)?;
    writer.flush().await.map_err(FtpsClientError::Transport)
}

/// Reads one reply line and strips its terminator.
///
/// At most `MAX_RESPONSE_LENGTH` bytes are buffered; a longer line is
/// rejected without waiting for its end. Fails with `PrematureClose` if
/// the stream ends before a `\n` arrives.
pub async fn read_response<R>(reader: &mut R) -> Result<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let n = (&mut *reader)
        .take(MAX_RESPONSE_LENGTH as u64 + 1)
        .read_until(b'\n', &mut buf)
        .await
        .map_err(FtpsClientError::Transport)?;

    if n == 0 {
        return Err(ProtocolError::PrematureClose.into());
    }
    if buf.len() > MAX_RESPONSE_LENGTH {
        return Err(ProtocolError::MalformedResponse(format!(
            "reply line longer than {} bytes",
            MAX_RESPONSE_LENGTH
        ))
        .into());
    }
    if buf.last() != Some(&b'\n') {
        return Err(ProtocolError::PrematureClose.into());
    }

    let line = String::from_utf8_lossy(&buf);
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
