//! Wallet records and the wallet file.
//!
//! # Security
//! - Private keys are never logged; `Debug` redacts them
//! - The file is read once at startup and never written

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// One wallet entry from the wallet file.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    /// Address used as the identity on the reward API.
    pub address: String,
    /// Hex-encoded private key (with or without 0x prefix).
    pub private_key: String,
    /// Optional proxy URL (socks5://, http://, ...).
    #[serde(default)]
    pub proxy: Option<String>,
}

impl WalletRecord {
    pub fn new(address: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            private_key: private_key.into(),
            proxy: None,
        }
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// The proxy to route through, treating blank strings as none.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

impl fmt::Debug for WalletRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletRecord")
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .field("proxy", &self.proxy)
            .finish()
    }
}

/// Errors reading the wallet file.
#[derive(Debug, Error)]
pub enum WalletFileError {
    #[error("No wallets found in {0}")]
    Missing(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No wallets found in {0} file")]
    Empty(String),
}

/// Load the wallet list. An absent file or an empty list is an error.
pub fn load_wallets(path: &Path) -> Result<Vec<WalletRecord>, WalletFileError> {
    let shown = path.display().to_string();
    if !path.exists() {
        return Err(WalletFileError::Missing(shown));
    }

    let content = std::fs::read_to_string(path).map_err(|source| WalletFileError::Io {
        path: shown.clone(),
        source,
    })?;
    let wallets: Vec<WalletRecord> =
        serde_json::from_str(&content).map_err(|source| WalletFileError::Parse {
            path: shown.clone(),
            source,
        })?;

    if wallets.is_empty() {
        return Err(WalletFileError::Empty(shown));
    }

    tracing::info!(count = wallets.len(), path = %shown, "Wallets loaded");
    Ok(wallets)
}
