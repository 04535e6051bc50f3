//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, intervals > 0)
//! - Check URLs and addresses parse before any network use
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MinerConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::MinerConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &MinerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.api.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::new(
            "api.base_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new("api.base_url", e.to_string())),
    }

    if config.api.request_timeout_secs == 0 {
        errors.push(ValidationError::new("api.request_timeout_secs", "must be > 0"));
    }
    if config.api.connect_timeout_secs == 0 {
        errors.push(ValidationError::new("api.connect_timeout_secs", "must be > 0"));
    }
    if config.schedule.cycle_interval_secs == 0 {
        errors.push(ValidationError::new("schedule.cycle_interval_secs", "must be > 0"));
    }

    if config.blockchain.enabled {
        if let Err(e) = url::Url::parse(&config.blockchain.rpc_url) {
            errors.push(ValidationError::new("blockchain.rpc_url", e.to_string()));
        }
        if config.blockchain.contract_address.parse::<Address>().is_err() {
            errors.push(ValidationError::new(
                "blockchain.contract_address",
                format!("invalid address '{}'", config.blockchain.contract_address),
            ));
        }
        if config.blockchain.rpc_timeout_secs == 0 {
            errors.push(ValidationError::new("blockchain.rpc_timeout_secs", "must be > 0"));
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("invalid socket address '{}'", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
