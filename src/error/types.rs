//! Error types
//!
//! Defines domain-specific error types for each module of the FTPS client.

use std::fmt;
use std::io;

use crate::client::SessionState;
use crate::protocol::Response;

/// Control/data channel protocol errors
#[derive(Debug)]
pub enum ProtocolError {
    MalformedPassiveResponse(String),
    MalformedResponse(String),
    PrematureClose,
    OutOfSequence {
        expected: SessionState,
        actual: SessionState,
    },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::MalformedPassiveResponse(line) => {
                write!(f, "Malformed passive response: {}", line)
            }
            ProtocolError::MalformedResponse(line) => write!(f, "Malformed response: {}", line),
            ProtocolError::PrematureClose => {
                write!(f, "Server closed the connection before a full line was received")
            }
            ProtocolError::OutOfSequence { expected, actual } => write!(
                f,
                "Session step out of sequence: expected state {:?}, session is {:?}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Command line and remote location validation errors
#[derive(Debug, PartialEq)]
pub enum UsageError {
    InvalidVerb(String),
    WrongLocationCount { verb: String, expected: usize, got: usize },
    InvalidRemoteLocation(String),
    RemoteLocationRequired(String),
    ExactlyOneRemote,
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::InvalidVerb(v) => write!(
                f,
                "Invalid operation '{}': expected one of ls, rm, rmdir, mkdir, cp, mv",
                v
            ),
            UsageError::WrongLocationCount { verb, expected, got } => write!(
                f,
                "'{}' takes {} location(s), {} given",
                verb, expected, got
            ),
            UsageError::InvalidRemoteLocation(msg) => write!(
                f,
                "Invalid remote location ({}): expected ftps://<user>:<password>@<host>[:port]/<path>",
                msg
            ),
            UsageError::RemoteLocationRequired(loc) => {
                write!(f, "Location must be a remote ftps:// URL: {}", loc)
            }
            UsageError::ExactlyOneRemote => {
                write!(f, "Exactly one of the two locations must be a remote ftps:// URL")
            }
        }
    }
}

impl std::error::Error for UsageError {}

/// General FTPS client error that encompasses all error types
#[derive(Debug)]
pub enum FtpsClientError {
    /// Control or data socket connect/read/write failure
    Transport(io::Error),
    /// TLS handshake failure on either channel
    Tls(native_tls::Error),
    Protocol(ProtocolError),
    /// Server answered a command with a failure status
    Operation(Response),
    /// Local file open/create/remove failure
    Io(io::Error),
    Usage(UsageError),
    Config(config::ConfigError),
}

impl fmt::Display for FtpsClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FtpsClientError::Transport(e) => write!(f, "Transport error: {}", e),
            FtpsClientError::Tls(e) => write!(f, "TLS error: {}", e),
            FtpsClientError::Protocol(e) => write!(f, "Protocol error: {}", e),
            FtpsClientError::Operation(r) => write!(f, "Error in control command: {}", r),
            FtpsClientError::Io(e) => write!(f, "File error: {}", e),
            FtpsClientError::Usage(e) => write!(f, "Usage error: {}", e),
            FtpsClientError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for FtpsClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FtpsClientError::Transport(e) | FtpsClientError::Io(e) => Some(e),
            FtpsClientError::Tls(e) => Some(e),
            FtpsClientError::Protocol(e) => Some(e),
            FtpsClientError::Usage(e) => Some(e),
            FtpsClientError::Config(e) => Some(e),
            FtpsClientError::Operation(_) => None,
        }
    }
}

// No From<io::Error>: call sites choose Transport (sockets) or Io (local files).
impl From<ProtocolError> for FtpsClientError {
    fn from(error: ProtocolError) -> Self {
        FtpsClientError::Protocol(error)
    }
}

impl From<UsageError> for FtpsClientError {
    fn from(error: UsageError) -> Self {
        FtpsClientError::Usage(error)
    }
}

impl From<native_tls::Error> for FtpsClientError {
    fn from(error: native_tls::Error) -> Self {
        FtpsClientError::Tls(error)
    }
}

impl From<config::ConfigError> for FtpsClientError {
    fn from(error: config::ConfigError) -> Self {
        FtpsClientError::Config(error)
    }
}

pub type Result<T> = std::result::Result<T, FtpsClientError>;
