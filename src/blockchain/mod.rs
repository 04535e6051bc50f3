//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Wallet file (private key)
//!     → signer.rs (key loading, personal-sign of the login nonce)
//!     → activation.rs (balance check, active() call, receipt)
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts
//! - Graceful degradation when blockchain unreachable

pub mod activation;
pub mod signer;
pub mod types;

pub use activation::{ContractActivator, MiningActivator};
pub use signer::{LocalSigner, MessageSigner};
pub use types::{BlockchainError, BlockchainResult, SigningError};
