//! RAX FTPS Client - Entry Point
//!
//! A command line client for FTP over explicit TLS.

use log::info;
use std::process;

use rax_ftps_client::cli::parse_args;
use rax_ftps_client::client::{Session, build_tls_connector};
use rax_ftps_client::config::ClientConfig;
use rax_ftps_client::error::Result;
use rax_ftps_client::error::handlers::handle_error;
use rax_ftps_client::operation::dispatch;
use rax_ftps_client::utils::logging::setup_logging;

#[tokio::main]
async fn main() {
    setup_logging();

    if let Err(e) = run().await {
        handle_error(&e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = ClientConfig::load()?;
    let invocation = parse_args(config.default_port)?;
    let remote = &invocation.remote;

    let connector = build_tls_connector(&config).await?;
    let mut session = Session::establish(
        &remote.host,
        remote.port,
        &remote.username,
        &remote.password,
        connector,
    )
    .await?;

    let outcome = dispatch(&mut session, &invocation.operation, |line| println!("{}", line)).await?;
    info!(
        "{} finished: {}",
        invocation.operation.verb(),
        outcome.final_response()
    );
    Ok(())
}
