//! Module `commands`
//!
//! Defines the FTP commands the client sends on the control channel
//! and how each one is rendered on the wire.

use std::fmt;

/// An FTP command issued by the client.
///
/// Commands that carry an argument store it as a `String`.
/// `Display` renders the command line without the CRLF terminator.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AuthTls,
    User(String),
    Pass(String),
    Pbsz(u32),
    /// Protection level; the client only ever requests `P` (private)
    Prot(char),
    /// Representation type; `I` is image/binary
    Type(char),
    /// Transfer mode; `S` is stream
    Mode(char),
    /// File structure; `F` is file
    Stru(char),
    Pasv,
    List(String),
    Retr(String),
    Stor(String),
    Dele(String),
    Rmd(String),
    Mkd(String),
}

impl Command {
    /// The command keyword as sent on the wire.
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::AuthTls => "AUTH",
            Command::User(_) => "USER",
            Command::Pass(_) => "PASS",
            Command::Pbsz(_) => "PBSZ",
            Command::Prot(_) => "PROT",
            Command::Type(_) => "TYPE",
            Command::Mode(_) => "MODE",
            Command::Stru(_) => "STRU",
            Command::Pasv => "PASV",
            Command::List(_) => "LIST",
            Command::Retr(_) => "RETR",
            Command::Stor(_) => "STOR",
            Command::Dele(_) => "DELE",
            Command::Rmd(_) => "RMD",
            Command::Mkd(_) => "MKD",
        }
    }

    /// Text safe to write to logs: the password argument is masked.
    pub fn redacted(&self) -> String {
        match self {
            Command::Pass(_) => "PASS ****".to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = self.keyword();
        match self {
            Command::AuthTls => write!(f, "{} TLS", keyword),
            Command::Pasv => write!(f, "{}", keyword),
            Command::Pbsz(size) => write!(f, "{} {}", keyword, size),
            Command::Prot(c) | Command::Type(c) | Command::Mode(c) | Command::Stru(c) => {
                write!(f, "{} {}", keyword, c)
            }
            Command::User(arg)
            | Command::Pass(arg)
            | Command::List(arg)
            | Command::Retr(arg)
            | Command::Stor(arg)
            | Command::Dele(arg)
            | Command::Rmd(arg)
            | Command::Mkd(arg) => write!(f, "{} {}", keyword, arg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handshake_commands_render() {
        assert_eq!(Command::AuthTls.to_string(), "AUTH TLS");
        assert_eq!(Command::Pbsz(0).to_string(), "PBSZ 0");
        assert_eq!(Command::Prot('P').to_string(), "PROT P");
        assert_eq!(Command::Type('I').to_string(), "TYPE I");
        assert_eq!(Command::Mode('S').to_string(), "MODE S");
        assert_eq!(Command::Stru('F').to_string(), "STRU F");
        assert_eq!(Command::Pasv.to_string(), "PASV");
    }

    #[test]
    fn test_path_commands_render() {
        assert_eq!(Command::List("/".into()).to_string(), "LIST /");
        assert_eq!(
            Command::Retr("/docs/a.txt".into()).to_string(),
            "RETR /docs/a.txt"
        );
        assert_eq!(Command::Stor("/up.bin".into()).to_string(), "STOR /up.bin");
        assert_eq!(Command::Dele("/old".into()).to_string(), "DELE /old");
        assert_eq!(Command::Rmd("/dir".into()).to_string(), "RMD /dir");
        assert_eq!(Command::Mkd("/dir".into()).to_string(), "MKD /dir");
    }

    #[test]
    fn test_password_is_redacted() {
        let pass = Command::Pass("hunter2".into());
        assert_eq!(pass.to_string(), "PASS hunter2");
        assert_eq!(pass.redacted(), "PASS ****");
        assert_eq!(Command::User("bob".into()).redacted(), "USER bob");
    }
}
