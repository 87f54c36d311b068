use std::net::SocketAddr;

use folio_common::content_store::StoreConfig;

use crate::error::AppError;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Site configuration loaded explicitly from environment variables.
///
/// Storage settings are shared with the MCP server so both processes see the
/// same content.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub store: StoreConfig,
}

impl Config {
    /// Optional:
    /// - `FOLIO_LISTEN_ADDR`: bind address (default: 127.0.0.1:8080)
    /// - storage variables read by [`StoreConfig::from_env`]
    pub fn from_env() -> Result<Self, AppError> {
        let raw = std::env::var("FOLIO_LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = raw
            .parse()
            .map_err(|e| AppError::Config(format!("FOLIO_LISTEN_ADDR {raw:?} is invalid: {e}")))?;

        Ok(Self {
            listen_addr,
            store: StoreConfig::from_env(),
        })
    }
}
