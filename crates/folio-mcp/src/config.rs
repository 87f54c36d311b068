use std::net::SocketAddr;

use folio_common::content_store::StoreConfig;

use crate::error::AppError;

/// MCP server configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// When set, serve MCP over TCP instead of stdio.
    pub tcp_listen_addr: Option<SocketAddr>,
    pub store: StoreConfig,
}

impl Config {
    /// Optional:
    /// - `MCP_TCP_LISTEN_ADDR`: e.g. "127.0.0.1:7070" (omit to serve on stdio)
    /// - storage variables read by [`StoreConfig::from_env`]
    pub fn from_env() -> Result<Self, AppError> {
        let tcp_listen_addr = match std::env::var("MCP_TCP_LISTEN_ADDR") {
            Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().parse().map_err(|e| {
                AppError::Config(format!("MCP_TCP_LISTEN_ADDR {raw:?} is invalid: {e}"))
            })?),
            _ => None,
        };

        Ok(Self {
            tcp_listen_addr,
            store: StoreConfig::from_env(),
        })
    }
}
