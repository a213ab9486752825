//! Client operations
//!
//! The verbs a user can request and what they produce.

pub mod dispatcher;

use std::path::PathBuf;

use crate::protocol::Response;
use crate::transfer::{Listing, TransferSummary};

pub use dispatcher::dispatch;

/// Which side of a `cp`/`mv` is remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferDirection {
    Download {
        remote_path: String,
        local_path: PathBuf,
    },
    Upload {
        local_path: PathBuf,
        remote_path: String,
    },
}

/// A requested operation with its remote path(s).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    List { path: String },
    RemoveFile { path: String },
    RemoveDirectory { path: String },
    MakeDirectory { path: String },
    Copy(TransferDirection),
    Move(TransferDirection),
}

impl Operation {
    /// The command-line verb for this operation.
    pub fn verb(&self) -> &'static str {
        match self {
            Operation::List { .. } => "ls",
            Operation::RemoveFile { .. } => "rm",
            Operation::RemoveDirectory { .. } => "rmdir",
            Operation::MakeDirectory { .. } => "mkdir",
            Operation::Copy(_) => "cp",
            Operation::Move(_) => "mv",
        }
    }
}

/// What a finished operation produced
#[derive(Debug, Clone)]
pub enum OperationOutcome {
    Listed(Listing),
    Completed(Response),
    Transferred(TransferSummary),
}

impl OperationOutcome {
    /// The last control-channel reply of the operation.
    pub fn final_response(&self) -> &Response {
        match self {
            OperationOutcome::Listed(listing) => &listing.final_response,
            OperationOutcome::Completed(response) => response,
            OperationOutcome::Transferred(summary) => &summary.final_response,
        }
    }
}
