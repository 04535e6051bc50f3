//! Wallet message signing.
//!
//! # Security
//! - Keys come from the wallet file and are never logged or serialized
//! - Messages are signed with the EIP-191 personal-sign prefix

use std::future::Future;

use alloy::primitives::{hex, Address};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::{Signature, Signer};

use crate::blockchain::types::SigningError;

/// Produces a personal-sign signature for an arbitrary message.
pub trait MessageSigner {
    /// Sign `message` and return the 0x-prefixed 65-byte signature.
    fn sign_message(&self, message: &str) -> impl Future<Output = Result<String, SigningError>> + Send;
}

/// Signer backed by a local private key.
#[derive(Debug, Clone)]
pub struct LocalSigner {
    signer: PrivateKeySigner,
}

impl LocalSigner {
    /// Create a signer from a hex-encoded private key (with or without 0x prefix).
    pub fn from_private_key(private_key_hex: &str) -> Result<Self, SigningError> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| SigningError::InvalidKey(format!("{}", e)))?;

        Ok(Self { signer })
    }

    /// Address derived from the private key.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The underlying key, for building a transaction-signing provider.
    pub fn key(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Sign and return the raw signature.
    pub async fn sign_raw(&self, message: &str) -> Result<Signature, SigningError> {
        self.signer
            .sign_message(message.as_bytes())
            .await
            .map_err(|e| SigningError::Sign(e.to_string()))
    }
}

impl MessageSigner for LocalSigner {
    async fn sign_message(&self, message: &str) -> Result<String, SigningError> {
        let signature = self.sign_raw(message).await?;
        Ok(hex::encode_prefixed(signature.as_bytes()))
    }
}
