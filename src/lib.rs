pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod operation;
pub mod protocol;
pub mod transfer;
pub mod utils;

pub use client::Session;
pub use config::ClientConfig;
pub use error::FtpsClientError;
