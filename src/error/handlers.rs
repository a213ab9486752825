//! Error handlers
//!
//! Reports fatal errors before the process exits.

use crate::error::types::FtpsClientError;
use log::error;

/// Handle a fatal client error
pub fn handle_error(err: &FtpsClientError) {
    error!("[{}] {}", error_kind(err), err);
}

/// Short, stable name of the error class
pub fn error_kind(err: &FtpsClientError) -> &'static str {
    match err {
        FtpsClientError::Transport(_) | FtpsClientError::Tls(_) => "transport",
        FtpsClientError::Protocol(_) => "protocol",
        FtpsClientError::Operation(_) => "operation",
        FtpsClientError::Io(_) => "io",
        FtpsClientError::Usage(_) => "usage",
        FtpsClientError::Config(_) => "config",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;
    use crate::protocol::Response;
    use std::io;

    #[test]
    fn test_error_kind_classification() {
        let transport = FtpsClientError::Transport(io::Error::from(io::ErrorKind::BrokenPipe));
        assert_eq!(error_kind(&transport), "transport");

        let local = FtpsClientError::Io(io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(error_kind(&local), "io");

        let protocol = FtpsClientError::from(ProtocolError::PrematureClose);
        assert_eq!(error_kind(&protocol), "protocol");

        let op = FtpsClientError::Operation(Response::parse("550 No such file"));
        assert_eq!(error_kind(&op), "operation");
        assert!(op.to_string().contains("550 No such file"));
    }
}
