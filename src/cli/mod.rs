//! Command line surface
//!
//! Argument parsing and `ftps://` location decoding.

pub mod args;
pub mod location;

pub use args::{Invocation, build_cli_args, parse_args, parse_invocation};
pub use location::{Location, RemoteLocation, is_remote};
