//! Transfer result types
//!
//! Defines result structures returned by transfer operations.

use crate::protocol::Response;

/// Result of a download or upload
#[derive(Debug, Clone)]
pub struct TransferSummary {
    pub bytes: u64,
    pub final_response: Response,
}

/// Result of a directory listing
#[derive(Debug, Clone)]
pub struct Listing {
    /// Listing lines exactly as the server sent them, without terminators
    pub lines: Vec<String>,
    pub final_response: Response,
}
