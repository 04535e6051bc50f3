//! Light-mining client (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!   wallets.json ──▶ Runner ──▶ per wallet (sequential):
//!                                 ApiClient ──(proxy?)──▶ reward API
//!                                 LocalSigner (personal-sign nonce)
//!                                 ContractActivator ───▶ JSON-RPC
//!                       │
//!                       └── sleep 1h, repeat
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use light_miner::config::load_config_or_default;
use light_miner::observability::{logging, metrics};
use light_miner::{load_wallets, LiveSessionFactory, Runner};

#[derive(Parser)]
#[command(name = "light-miner")]
#[command(about = "Automated light-mining client for a list of wallets", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file (defaults are used when absent).
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Path to the JSON wallet list.
    #[arg(short, long, default_value = "wallets.json")]
    wallets: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_found = cli.config.exists();
    let config = load_config_or_default(&cli.config)?;

    logging::init_logging(&config.observability.log_level);

    tracing::info!("light-miner v{} starting", env!("CARGO_PKG_VERSION"));
    if !config_found {
        tracing::warn!(path = %cli.config.display(), "Config file not found, using defaults");
    }

    tracing::info!(
        base_url = %config.api.base_url,
        max_retries = config.retries.max_retries,
        retry_delay_secs = config.retries.delay_secs,
        cycle_interval_secs = config.schedule.cycle_interval_secs,
        on_chain = config.blockchain.enabled,
        "Configuration loaded"
    );
    if !config.blockchain.enabled {
        tracing::warn!("On-chain activation is disabled, only server-side mining will be started");
    }

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let wallets = match load_wallets(&cli.wallets) {
        Ok(wallets) => wallets,
        Err(e) => {
            tracing::error!(error = %e, "Exiting");
            std::process::exit(1);
        }
    };
    metrics::record_wallets_loaded(wallets.len());

    let cycle_interval = Duration::from_secs(config.schedule.cycle_interval_secs);
    let runner = Runner::new(LiveSessionFactory::new(config), wallets, cycle_interval);
    runner.run().await;

    Ok(())
}
