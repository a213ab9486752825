//! FTP Protocol implementation
//!
//! Command rendering, reply parsing, line framing and PASV address decoding.

pub mod codec;
pub mod commands;
pub mod passive;
pub mod responses;

pub use codec::{read_response, write_command};
pub use commands::Command;
pub use passive::{PassiveAddress, parse_passive_response};
pub use responses::{Response, StatusClass};
