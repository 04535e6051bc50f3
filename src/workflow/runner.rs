//! Outer loop: every wallet in order, then cool down, forever.

use std::time::Duration;

use alloy::primitives::Address;
use thiserror::Error;
use tracing::Instrument;

use crate::api::{ApiClient, NetworkError, RewardApi};
use crate::blockchain::{
    BlockchainError, ContractActivator, LocalSigner, MessageSigner, MiningActivator, SigningError,
};
use crate::config::MinerConfig;
use crate::observability::metrics;
use crate::wallet::WalletRecord;
use crate::workflow::clock::{Clock, SystemClock};
use crate::workflow::driver::{CycleOutcome, WalletWorkflow, WorkflowSettings};

/// Failure building a wallet's services.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("HTTP client: {0}")]
    Network(#[from] NetworkError),

    #[error("signer: {0}")]
    Signing(#[from] SigningError),

    #[error("activator: {0}")]
    Blockchain(#[from] BlockchainError),
}

/// Builds a fresh workflow (own HTTP client, own proxy) for each wallet visit.
pub trait SessionFactory {
    type Api: RewardApi + Send + Sync;
    type Signer: MessageSigner + Send + Sync;
    type Activator: MiningActivator + Send + Sync;
    type Clock: Clock;

    fn workflow(
        &self,
        wallet: &WalletRecord,
    ) -> Result<WalletWorkflow<Self::Api, Self::Signer, Self::Activator, Self::Clock>, SetupError>;
}

/// Production factory: reqwest client, local key, contract activator.
#[derive(Debug, Clone)]
pub struct LiveSessionFactory {
    config: MinerConfig,
}

impl LiveSessionFactory {
    pub fn new(config: MinerConfig) -> Self {
        Self { config }
    }
}

impl SessionFactory for LiveSessionFactory {
    type Api = ApiClient;
    type Signer = LocalSigner;
    type Activator = ContractActivator;
    type Clock = SystemClock;

    fn workflow(
        &self,
        wallet: &WalletRecord,
    ) -> Result<WalletWorkflow<ApiClient, LocalSigner, ContractActivator, SystemClock>, SetupError>
    {
        let api = ApiClient::new(&self.config.api, wallet.proxy())?;
        let signer = LocalSigner::from_private_key(&wallet.private_key)?;

        match wallet.address.parse::<Address>() {
            Ok(listed) if listed != signer.address() => tracing::warn!(
                listed = %listed,
                derived = %signer.address(),
                "Wallet address does not match its private key"
            ),
            Ok(_) => {}
            Err(_) => tracing::warn!(wallet = %wallet.address, "Wallet address is not a valid EVM address"),
        }

        let activator = ContractActivator::new(&self.config.blockchain, signer.key().clone())?;

        Ok(WalletWorkflow::new(
            api,
            signer,
            activator,
            SystemClock,
            WorkflowSettings::from(&self.config),
        ))
    }
}

/// Tally of one pass over the wallet list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleSummary {
    pub visited: usize,
    pub mined: usize,
    pub cooldown: usize,
    pub failed: usize,
}

/// Sequential driver over the static wallet list.
pub struct Runner<F> {
    factory: F,
    wallets: Vec<WalletRecord>,
    cycle_interval: Duration,
}

impl<F> Runner<F>
where
    F: SessionFactory,
{
    pub fn new(factory: F, wallets: Vec<WalletRecord>, cycle_interval: Duration) -> Self {
        Self {
            factory,
            wallets,
            cycle_interval,
        }
    }

    /// Visit every wallet exactly once, in list order.
    pub async fn run_cycle(&self) -> CycleSummary {
        tracing::info!(wallets = self.wallets.len(), "Starting processing all wallets");
        let mut summary = CycleSummary::default();

        for wallet in &self.wallets {
            summary.visited += 1;
            let span = tracing::info_span!("wallet", address = %wallet.address);

            let workflow = match self.factory.workflow(wallet) {
                Ok(workflow) => workflow,
                Err(e) => {
                    span.in_scope(|| tracing::error!(error = %e, "Failed to prepare wallet"));
                    metrics::record_cycle("setup_failed");
                    summary.failed += 1;
                    continue;
                }
            };

            match workflow.process(wallet).instrument(span.clone()).await {
                Ok(outcome) => {
                    metrics::record_cycle(outcome.label());
                    match outcome {
                        CycleOutcome::Mined { .. } => summary.mined += 1,
                        CycleOutcome::Cooldown { .. } => summary.cooldown += 1,
                    }
                }
                Err(e) => {
                    span.in_scope(|| tracing::error!(error = %e, "Wallet cycle aborted"));
                    metrics::record_cycle(e.label());
                    summary.failed += 1;
                }
            }
        }

        summary
    }

    /// Loop until the process is terminated.
    pub async fn run(self) {
        loop {
            let summary = self.run_cycle().await;
            tracing::info!(
                mined = summary.mined,
                cooldown = summary.cooldown,
                failed = summary.failed,
                "All wallets processed, cooling down for {:?} before checking again",
                self.cycle_interval
            );
            tokio::time::sleep(self.cycle_interval).await;
        }
    }
}
