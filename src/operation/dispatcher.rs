//! Operation dispatcher
//!
//! Maps the six client verbs onto session commands and transfers.
//! `mv` is a copy followed by deleting the source; nothing is rolled
//! back if the delete fails.

use log::info;

use crate::client::Session;
use crate::error::{FtpsClientError, Result};
use crate::operation::{Operation, OperationOutcome, TransferDirection};
use crate::protocol::{Command, Response};
use crate::transfer::{TransferSummary, download, list, upload};

/// Runs one operation on an established session.
///
/// Listing lines are handed to `sink` as they arrive.
pub async fn dispatch<F>(
    session: &mut Session,
    operation: &Operation,
    sink: F,
) -> Result<OperationOutcome>
where
    F: FnMut(&str),
{
    info!("Running {}", operation.verb());
    match operation {
        Operation::List { path } => {
            let listing = list(session, path, sink).await?;
            Ok(OperationOutcome::Listed(listing))
        }
        Operation::RemoveFile { path } => {
            let response = simple(session, Command::Dele(path.clone())).await?;
            Ok(OperationOutcome::Completed(response))
        }
        Operation::RemoveDirectory { path } => {
            let response = simple(session, Command::Rmd(path.clone())).await?;
            Ok(OperationOutcome::Completed(response))
        }
        Operation::MakeDirectory { path } => {
            let response = simple(session, Command::Mkd(path.clone())).await?;
            Ok(OperationOutcome::Completed(response))
        }
        Operation::Copy(direction) => {
            let summary = copy(session, direction).await?;
            Ok(OperationOutcome::Transferred(summary))
        }
        Operation::Move(direction) => {
            let summary = copy(session, direction).await?;
            match direction {
                TransferDirection::Download { remote_path, .. } => {
                    simple(session, Command::Dele(remote_path.clone())).await?;
                }
                TransferDirection::Upload { local_path, .. } => {
                    tokio::fs::remove_file(local_path)
                        .await
                        .map_err(FtpsClientError::Io)?;
                    info!("Removed local source {}", local_path.display());
                }
            }
            Ok(OperationOutcome::Transferred(summary))
        }
    }
}

async fn copy(session: &mut Session, direction: &TransferDirection) -> Result<TransferSummary> {
    match direction {
        TransferDirection::Download {
            remote_path,
            local_path,
        } => download(session, remote_path, local_path).await,
        TransferDirection::Upload {
            local_path,
            remote_path,
        } => upload(session, local_path, remote_path).await,
    }
}

/// Control-channel-only command; a failure reply aborts.
async fn simple(session: &mut Session, command: Command) -> Result<Response> {
    let response = session.execute(&command).await?;
    if response.is_failure() {
        return Err(FtpsClientError::Operation(response));
    }
    Ok(response)
}
