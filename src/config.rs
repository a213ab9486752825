//! Configuration management for the RAX FTPS client
//!
//! Settings come from an optional `config.toml` in the working directory,
//! overridden by `RAX_FTPS_*` environment variables.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Control port used when a remote location does not name one
pub const DEFAULT_CONTROL_PORT: u16 = 21;

/// Client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Port for the control connection when the URL omits it
    /// Environment: RAX_FTPS_DEFAULT_PORT
    pub default_port: u16,

    /// Skip certificate and hostname verification on both channels
    /// Environment: RAX_FTPS_ACCEPT_INVALID_CERTS
    pub accept_invalid_certs: bool,

    /// Extra PEM trust anchor for servers with a private CA
    /// Environment: RAX_FTPS_CA_CERTIFICATE
    pub ca_certificate: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_port: DEFAULT_CONTROL_PORT,
            accept_invalid_certs: false,
            ca_certificate: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .set_default("default_port", i64::from(DEFAULT_CONTROL_PORT))?
            .set_default("accept_invalid_certs", false)?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("RAX_FTPS").try_parsing(true))
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.default_port == 0 {
            return Err(config::ConfigError::Message(
                "default_port cannot be 0".into(),
            ));
        }

        if let Some(path) = &self.ca_certificate {
            if path.is_empty() {
                return Err(config::ConfigError::Message(
                    "ca_certificate cannot be empty when set".into(),
                ));
            }
        }

        Ok(())
    }

    /// Get the CA certificate path as PathBuf
    pub fn ca_certificate_path(&self) -> Option<PathBuf> {
        self.ca_certificate.as_ref().map(PathBuf::from)
    }
}
