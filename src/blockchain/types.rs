//! Chain-specific error definitions.

use thiserror::Error;

/// Errors producing a wallet signature.
#[derive(Debug, Error)]
pub enum SigningError {
    /// Invalid private key format.
    #[error("Invalid private key format: {0}")]
    InvalidKey(String),

    /// The signer rejected the message.
    #[error("Message signing failed: {0}")]
    Sign(String),
}

/// Errors that can occur during on-chain activation.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Receipt did not arrive in time.
    #[error("Transaction not confirmed after {0} seconds")]
    ConfirmationTimeout(u64),

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Native balance too low to pay for activation.
    #[error("Insufficient balance: {balance} wei")]
    InsufficientBalance { balance: String },

    /// Malformed contract or wallet address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// On-chain activation disabled or not configured.
    #[error("Blockchain not available: {0}")]
    NotAvailable(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;
