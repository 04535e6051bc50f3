//! Reward-mining client library.
//!
//! Authenticates each configured wallet against the light-mining API,
//! checks the 24h eligibility window and starts mining both server-side
//! and on-chain.

pub mod api;
pub mod blockchain;
pub mod config;
pub mod observability;
pub mod resilience;
pub mod wallet;
pub mod workflow;

pub use config::MinerConfig;
pub use wallet::{load_wallets, WalletRecord};
pub use workflow::{LiveSessionFactory, Runner, WalletWorkflow};
