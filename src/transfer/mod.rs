//! Transfer module for the FTPS client
//!
//! Handles passive data channel negotiation and the byte transfers
//! (RETR, STOR, LIST) that run over it.

pub mod data_channel;
pub mod operations;
pub mod results;

// Re-export key types and functions
pub use data_channel::{DataChannel, open_passive_channel};
pub use operations::{download, list, upload};
pub use results::{Listing, TransferSummary};
