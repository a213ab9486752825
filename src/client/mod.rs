//! FTPS control channel
//!
//! Handles the control connection, its TLS upgrade and the session lifecycle.

pub mod session;
pub mod state;
pub mod tls;

pub use session::Session;
pub use state::SessionState;
pub use tls::build_tls_connector;
