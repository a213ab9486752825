//! Control channel session
//!
//! Owns the control socket and walks it through the explicit-TLS handshake:
//! greeting, `AUTH TLS`, login, `PBSZ`/`PROT` and transfer parameters.
//! Every step is checked against [`SessionState`] so the sequence cannot
//! be reordered, and credentials are never written before TLS is up.

use std::io;

use log::{debug, info};
use tokio::io::BufReader;
use tokio::net::TcpStream;
use tokio_native_tls::{TlsConnector, TlsStream};

use crate::client::SessionState;
use crate::client::tls;
use crate::error::{FtpsClientError, ProtocolError, Result};
use crate::protocol::{Command, Response, read_response, write_command};

/// The control socket before and after the TLS upgrade.
enum ControlStream {
    Plain(BufReader<TcpStream>),
    Tls(BufReader<TlsStream<TcpStream>>),
}

impl ControlStream {
    async fn write_line(&mut self, text: &str) -> Result<()> {
        match self {
            ControlStream::Plain(s) => write_command(s, text).await,
            ControlStream::Tls(s) => write_command(s, text).await,
        }
    }

    async fn read_line(&mut self) -> Result<String> {
        match self {
            ControlStream::Plain(s) => read_response(s).await,
            ControlStream::Tls(s) => read_response(s).await,
        }
    }
}

/// An FTPS control connection.
pub struct Session {
    /// Empty only after a failed TLS upgrade.
    stream: Option<ControlStream>,
    host: String,
    state: SessionState,
    connector: TlsConnector,
    greeting: Response,
}

impl Session {
    /// Opens the control socket and reads the server greeting.
    pub async fn connect(host: &str, port: u16, connector: TlsConnector) -> Result<Self> {
        info!("Connecting to {}:{}", host, port);
        let tcp = TcpStream::connect((host, port))
            .await
            .map_err(FtpsClientError::Transport)?;

        let mut stream = ControlStream::Plain(BufReader::new(tcp));
        let greeting = Response::parse(&stream.read_line().await?);
        info!("{}", greeting);

        Ok(Self {
            stream: Some(stream),
            host: host.to_string(),
            state: SessionState::Connected,
            connector,
            greeting,
        })
    }

    /// Connect, secure, log in and configure data protection in one go.
    pub async fn establish(
        host: &str,
        port: u16,
        username: &str,
        password: &str,
        connector: TlsConnector,
    ) -> Result<Self> {
        let mut session = Self::connect(host, port, connector).await?;
        session.secure().await?;
        session.login(username, password).await?;
        session.configure_protection().await?;
        Ok(session)
    }

    /// Sends `AUTH TLS` and upgrades the control socket.
    ///
    /// A failure reply aborts before the handshake is attempted.
    pub async fn secure(&mut self) -> Result<Response> {
        self.require(SessionState::TlsNegotiated)?;

        let response = self.exchange(&Command::AuthTls).await?;
        if response.is_failure() {
            return Err(FtpsClientError::Operation(response));
        }

        let reader = match self.stream.take() {
            Some(ControlStream::Plain(reader)) => reader,
            Some(other) => {
                self.stream = Some(other);
                return Err(FtpsClientError::Transport(io::Error::other(
                    "control channel is already encrypted",
                )));
            }
            None => return Err(detached()),
        };
        if !reader.buffer().is_empty() {
            return Err(ProtocolError::MalformedResponse(
                "unexpected data after AUTH TLS reply".into(),
            )
            .into());
        }

        let tcp = reader.into_inner();
        let tls_stream = tls::handshake(&self.connector, &self.host, tcp).await?;
        self.stream = Some(ControlStream::Tls(BufReader::new(tls_stream)));
        self.state = SessionState::TlsNegotiated;
        Ok(response)
    }

    /// Sends `USER` and `PASS`. Replies are echoed but not checked; the
    /// `PASS` reply is returned so callers can inspect it.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Response> {
        self.require(SessionState::Authenticated)?;

        self.exchange(&Command::User(username.to_string())).await?;
        let response = self.exchange(&Command::Pass(password.to_string())).await?;
        self.state = SessionState::Authenticated;
        Ok(response)
    }

    /// Sends `PBSZ 0` and `PROT P` so data channels are encrypted.
    pub async fn configure_protection(&mut self) -> Result<()> {
        self.require(SessionState::ProtectionConfigured)?;

        self.exchange(&Command::Pbsz(0)).await?;
        self.exchange(&Command::Prot('P')).await?;
        self.state = SessionState::ProtectionConfigured;
        Ok(())
    }

    /// Sends `TYPE I`, `MODE S` and `STRU F`. May be repeated once `Ready`.
    pub async fn configure_transfer_mode(&mut self) -> Result<()> {
        if self.state != SessionState::Ready {
            self.require(SessionState::Ready)?;
        }

        self.exchange(&Command::Type('I')).await?;
        self.exchange(&Command::Mode('S')).await?;
        self.exchange(&Command::Stru('F')).await?;
        self.state = SessionState::Ready;
        Ok(())
    }

    /// Writes a command and returns its single reply line.
    pub async fn execute(&mut self, command: &Command) -> Result<Response> {
        self.send(command).await?;
        self.read_response().await
    }

    /// Writes a command without waiting for the reply.
    ///
    /// Only allowed once data protection has been negotiated.
    pub async fn send(&mut self, command: &Command) -> Result<()> {
        if self.state < SessionState::ProtectionConfigured {
            return Err(ProtocolError::OutOfSequence {
                expected: SessionState::ProtectionConfigured,
                actual: self.state,
            }
            .into());
        }
        self.write(command).await
    }

    /// Reads and echoes one reply line.
    pub async fn read_response(&mut self) -> Result<Response> {
        let stream = self.stream.as_mut().ok_or_else(detached)?;
        let response = Response::parse(&stream.read_line().await?);
        info!("{}", response);
        Ok(response)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn greeting(&self) -> &Response {
        &self.greeting
    }

    pub fn tls_connector(&self) -> &TlsConnector {
        &self.connector
    }

    async fn exchange(&mut self, command: &Command) -> Result<Response> {
        self.write(command).await?;
        self.read_response().await
    }

    async fn write(&mut self, command: &Command) -> Result<()> {
        let stream = self.stream.as_mut().ok_or_else(detached)?;
        debug!(">>> {}", command.redacted());
        stream.write_line(&command.to_string()).await
    }

    /// Checks that the session sits right before `target`.
    fn require(&self, target: SessionState) -> Result<()> {
        match target.predecessor() {
            Some(expected) if expected == self.state => Ok(()),
            Some(expected) => Err(ProtocolError::OutOfSequence {
                expected,
                actual: self.state,
            }
            .into()),
            None => Ok(()),
        }
    }
}

fn detached() -> FtpsClientError {
    FtpsClientError::Transport(io::Error::new(
        io::ErrorKind::NotConnected,
        "control channel was lost during the TLS upgrade",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn connector() -> TlsConnector {
        TlsConnector::from(native_tls::TlsConnector::new().unwrap())
    }

    #[tokio::test]
    async fn test_connect_reads_greeting() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            stream.write_all(b"220 FTPS ready\r\n").await.unwrap();
            stream
        });

        let session = Session::connect("127.0.0.1", port, connector()).await.unwrap();
        assert_eq!(session.state(), SessionState::Connected);
        assert_eq!(session.greeting().code(), "220");
        assert_eq!(session.host(), "127.0.0.1");
        drop(server.await.unwrap());
    }

    #[tokio::test]
    async fn test_steps_out_of_order_are_rejected_without_io() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            stream.write_all(b"220 FTPS ready\r\n").await.unwrap();
            let mut received = Vec::new();
            stream.read_to_end(&mut received).await.unwrap();
            received
        });

        let mut session = Session::connect("127.0.0.1", port, connector()).await.unwrap();

        let err = session.login("user", "secret").await.unwrap_err();
        assert!(matches!(
            err,
            FtpsClientError::Protocol(ProtocolError::OutOfSequence {
                expected: SessionState::TlsNegotiated,
                actual: SessionState::Connected,
            })
        ));
        assert!(session.configure_protection().await.is_err());
        assert!(session.configure_transfer_mode().await.is_err());
        assert!(session.execute(&Command::Pasv).await.is_err());
        assert_eq!(session.state(), SessionState::Connected);

        drop(session);
        let received = server.await.unwrap();
        assert!(received.is_empty(), "no command may reach the server");
    }

    #[tokio::test]
    async fn test_rejected_auth_tls_stops_before_handshake() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            stream.write_all(b"220 FTP ready\r\n").await.unwrap();
            let mut buf = [0u8; 64];
            let n = stream.read(&mut buf).await.unwrap();
            stream
                .write_all(b"504 Security mechanism not implemented\r\n")
                .await
                .unwrap();
            String::from_utf8_lossy(&buf[..n]).to_string()
        });

        let mut session = Session::connect("127.0.0.1", port, connector()).await.unwrap();
        let err = session.secure().await.unwrap_err();
        assert!(matches!(err, FtpsClientError::Operation(ref r) if r.code() == "504"));
        assert_eq!(session.state(), SessionState::Connected);
        assert_eq!(server.await.unwrap(), "AUTH TLS\r\n");
    }
}
