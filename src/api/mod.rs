//! Reward API integration.
//!
//! # Data Flow
//! ```text
//! WalletWorkflow
//!     → RewardApi (trait, one method per endpoint)
//!     → client.rs (ApiClient: reqwest, optional per-wallet proxy)
//!     → types.rs ({ data: ... } envelopes, optional fields)
//! ```

pub mod client;
pub mod types;

pub use client::{ApiClient, NetworkError, RewardApi};
pub use types::{Envelope, LoginData, LoginRequest, MinerStatus, NonceData, UserInfo};
