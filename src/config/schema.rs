//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the miner.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the mining client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MinerConfig {
    /// Remote reward API settings.
    pub api: ApiConfig,

    /// Retry policy applied around every remote API call.
    pub retries: RetryConfig,

    /// Outer loop and eligibility timing.
    pub schedule: ScheduleConfig,

    /// On-chain activation settings.
    pub blockchain: BlockchainConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Remote API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base endpoint all relative API paths are joined onto.
    pub base_url: String,

    /// Invitation code sent with every login.
    pub invitation_code: String,

    /// Total time allowed for a single request in seconds.
    pub request_timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Optional User-Agent header override.
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://lightmining-api.taker.xyz/".to_string(),
            invitation_code: "XX89R".to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: None,
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Number of retries after the first failed attempt.
    pub max_retries: u32,

    /// Fixed delay between attempts in seconds.
    pub delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay_secs: 3,
        }
    }
}

/// Scheduling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Pause after every wallet has been processed, in seconds.
    pub cycle_interval_secs: u64,

    /// Cooldown after the last recorded mining time, in seconds.
    pub mining_cooldown_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            cycle_interval_secs: 60 * 60,
            mining_cooldown_secs: 24 * 60 * 60,
        }
    }
}

/// Blockchain integration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockchainConfig {
    /// Enable on-chain mining activation.
    pub enabled: bool,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Chain ID used for EIP-155 signing.
    pub chain_id: u64,

    /// Address of the mining activation contract.
    pub contract_address: String,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Maximum time to wait for the activation receipt in seconds.
    pub confirmation_timeout_secs: u64,

    /// Minimum native balance (wei) required before submitting.
    pub min_balance_wei: u64,
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            rpc_url: "https://rpc-mainnet.taker.xyz".to_string(),
            chain_id: 1125,
            contract_address: String::new(),
            rpc_timeout_secs: 30,
            confirmation_timeout_secs: 120,
            min_balance_wei: 0,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
