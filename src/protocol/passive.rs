//! Passive address codec
//!
//! Parses the `227 Entering Passive Mode (h1,h2,h3,h4,p1,p2).` reply
//! into the IPv4 address and port the client must connect to.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use crate::error::ProtocolError;
use crate::protocol::responses::PASSIVE_MODE;

/// Address advertised by the server for the next data connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassiveAddress {
    pub ip: Ipv4Addr,
    pub port: u16,
}

impl PassiveAddress {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.ip, self.port))
    }
}

impl fmt::Display for PassiveAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}

/// Parses a PASV reply line.
///
/// The line must carry code 227 and split into exactly five whitespace
/// separated tokens; the fifth holds six comma separated octets inside
/// parentheses, optionally followed by punctuation. The port is
/// `p1 * 256 + p2`.
pub fn parse_passive_response(line: &str) -> Result<PassiveAddress, ProtocolError> {
    let malformed = || ProtocolError::MalformedPassiveResponse(line.to_string());

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 5 || tokens[0] != PASSIVE_MODE.to_string() {
        return Err(malformed());
    }

    let inner = tokens[4]
        .strip_prefix('(')
        .and_then(|rest| rest.split_once(')'))
        .map(|(inside, _trailing)| inside)
        .ok_or_else(malformed)?;

    let octets = inner
        .split(',')
        .map(|part| part.parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|_| malformed())?;
    if octets.len() != 6 {
        return Err(malformed());
    }

    Ok(PassiveAddress {
        ip: Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3]),
        port: u16::from(octets[4]) * 256 + u16::from(octets[5]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_typical_reply() {
        let addr =
            parse_passive_response("227 Entering Passive Mode (128,119,245,12,195,149).").unwrap();
        assert_eq!(addr.ip.to_string(), "128.119.245.12");
        assert_eq!(addr.port, 50069);
        assert_eq!(addr.to_string(), "128.119.245.12:50069");
    }

    #[test]
    fn test_parse_without_trailing_punctuation() {
        let addr = parse_passive_response("227 Entering Passive Mode (127,0,0,1,4,1)").unwrap();
        assert_eq!(addr.socket_addr(), "127.0.0.1:1025".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_parse_octet_bounds() {
        for (p1, p2) in [(0u16, 0u16), (0, 255), (255, 0), (255, 255), (19, 137)] {
            let line = format!("227 Entering Passive Mode (0,255,10,200,{},{}).", p1, p2);
            let addr = parse_passive_response(&line).unwrap();
            assert_eq!(addr.ip, Ipv4Addr::new(0, 255, 10, 200));
            assert_eq!(addr.port, p1 * 256 + p2);
        }
    }

    #[test]
    fn test_reject_wrong_code() {
        assert!(parse_passive_response("229 Entering Passive Mode (1,2,3,4,5,6).").is_err());
        assert!(parse_passive_response("425 Entering Passive Mode (1,2,3,4,5,6).").is_err());
    }

    #[test]
    fn test_reject_wrong_token_count() {
        assert!(parse_passive_response("227 Passive (1,2,3,4,5,6).").is_err());
        assert!(parse_passive_response("227 Entering Extended Passive Mode (1,2,3,4,5,6).").is_err());
        assert!(parse_passive_response("227").is_err());
    }

    #[test]
    fn test_reject_bad_octets() {
        for line in [
            "227 Entering Passive Mode (1,2,3,4,5).",
            "227 Entering Passive Mode (1,2,3,4,5,6,7).",
            "227 Entering Passive Mode (1,2,3,256,5,6).",
            "227 Entering Passive Mode (1,2,3,4,5,-6).",
            "227 Entering Passive Mode (a,2,3,4,5,6).",
            "227 Entering Passive Mode 1,2,3,4,5,6.",
            "227 Entering Passive Mode (1,2,3,4,5,6.",
        ] {
            let err = parse_passive_response(line).unwrap_err();
            assert!(
                matches!(err, ProtocolError::MalformedPassiveResponse(ref l) if l == line),
                "{line} should be rejected"
            );
        }
    }
}
