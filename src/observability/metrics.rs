//! Metrics collection and exposition.
//!
//! # Metrics
//! - `miner_wallet_cycles_total` (counter): finished wallet cycles by outcome
//! - `miner_request_retries_total` (counter): retried API calls by operation
//! - `miner_mining_started_total` (counter): accepted startMining requests
//! - `miner_activation_total` (counter): on-chain activations by result
//! - `miner_wallets_loaded` (gauge): wallets read from the wallet file
//!
//! Without an installed recorder every call below is a no-op.

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_wallets_loaded(count: usize) {
    gauge!("miner_wallets_loaded").set(count as f64);
}

pub fn record_cycle(outcome: &'static str) {
    counter!("miner_wallet_cycles_total", "outcome" => outcome).increment(1);
}

pub fn record_retry(operation: &'static str) {
    counter!("miner_request_retries_total", "operation" => operation).increment(1);
}

pub fn record_mining_started() {
    counter!("miner_mining_started_total").increment(1);
}

pub fn record_activation(result: &'static str) {
    counter!("miner_activation_total", "result" => result).increment(1);
}
