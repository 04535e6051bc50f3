//! Per-wallet authentication and mining workflow.
//!
//! # State Machine
//! ```text
//! RequestNonce ─▶ Sign ─▶ Login ─▶ FetchUserInfo ─▶ FetchMinerStatus ─▶ EligibilityCheck
//!      │            │        │          (non-fatal)          │                 │
//!      ▼            ▼        ▼                               ▼          ┌──────┴──────┐
//!    abort        abort    abort                           abort     Cooldown   TriggerMining
//!                                                                                   │
//!                                                                   startMining ─▶ on-chain active()
//! ```
//!
//! Every remote call goes through [`retry`]. An exhausted retry is a typed
//! error, so nested response data is only reachable after a success.

use alloy::primitives::TxHash;
use thiserror::Error;

use crate::api::{LoginRequest, NetworkError, RewardApi};
use crate::blockchain::{BlockchainError, MessageSigner, MiningActivator, SigningError};
use crate::config::MinerConfig;
use crate::observability::metrics;
use crate::resilience::{retry, RetryError, RetryPolicy};
use crate::wallet::WalletRecord;
use crate::workflow::clock::Clock;
use crate::workflow::eligibility::{format_remaining, is_eligible, next_eligible_at};

/// Ephemeral per-cycle credentials. Never persisted.
#[derive(Clone)]
pub struct Session {
    pub nonce: String,
    pub signature: String,
    pub token: String,
}

/// Knobs the workflow needs from configuration.
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    pub invitation_code: String,
    pub retry: RetryPolicy,
    pub mining_cooldown_secs: u64,
}

impl From<&MinerConfig> for WorkflowSettings {
    fn from(config: &MinerConfig) -> Self {
        Self {
            invitation_code: config.api.invitation_code.clone(),
            retry: RetryPolicy::from(&config.retries),
            mining_cooldown_secs: config.schedule.mining_cooldown_secs,
        }
    }
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self::from(&MinerConfig::default())
    }
}

/// Reasons a wallet's cycle stopped early.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("failed to retrieve nonce: {0}")]
    Nonce(RetryError<NetworkError>),

    #[error("nonce missing from response")]
    MissingNonce,

    #[error("failed to sign nonce: {0}")]
    Signing(#[from] SigningError),

    #[error("login failed: {0}")]
    Login(RetryError<NetworkError>),

    #[error("token missing from login response")]
    MissingToken,

    #[error("failed to get miner status: {0}")]
    MinerStatus(RetryError<NetworkError>),

    #[error("miner status missing from response")]
    MissingMinerStatus,

    #[error("failed to start mining: {0}")]
    StartMining(RetryError<NetworkError>),
}

impl WorkflowError {
    /// Short label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Nonce(_) | Self::MissingNonce => "nonce_failed",
            Self::Signing(_) => "signing_failed",
            Self::Login(_) | Self::MissingToken => "login_failed",
            Self::MinerStatus(_) | Self::MissingMinerStatus => "status_failed",
            Self::StartMining(_) => "start_mining_failed",
        }
    }
}

/// Result of the on-chain step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    Confirmed { tx_hash: TxHash },
    Failed { reason: String },
    Disabled,
}

/// How a completed wallet cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Still inside the cooldown window; nothing was triggered.
    Cooldown {
        last_mining_time: u64,
        next_eligible_at: u64,
    },
    /// Mining was started server-side, then the on-chain step ran.
    Mined { activation: ActivationOutcome },
}

impl CycleOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cooldown { .. } => "cooldown",
            Self::Mined { .. } => "mined",
        }
    }
}

/// Drives one wallet through a full cycle.
pub struct WalletWorkflow<A, S, M, C> {
    api: A,
    signer: S,
    activator: M,
    clock: C,
    settings: WorkflowSettings,
}

impl<A, S, M, C> WalletWorkflow<A, S, M, C>
where
    A: RewardApi + Sync,
    S: MessageSigner + Sync,
    M: MiningActivator + Sync,
    C: Clock,
{
    pub fn new(api: A, signer: S, activator: M, clock: C, settings: WorkflowSettings) -> Self {
        Self {
            api,
            signer,
            activator,
            clock,
            settings,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn activator(&self) -> &M {
        &self.activator
    }

    /// Run the whole sequence for `wallet`.
    pub async fn process(&self, wallet: &WalletRecord) -> Result<CycleOutcome, WorkflowError> {
        let session = self.authenticate(wallet).await?;

        self.report_user(wallet, &session.token).await;

        tracing::info!("Trying to check miner status");
        let api = &self.api;
        let token = session.token.as_str();
        let status = retry(&self.settings.retry, "miner_status", || api.miner_status(token))
            .await
            .map_err(WorkflowError::MinerStatus)?
            .into_data()
            .ok_or(WorkflowError::MissingMinerStatus)?;

        let last_mining_time = status.last_mining_time_or_epoch();
        let cooldown = self.settings.mining_cooldown_secs;
        let next = next_eligible_at(last_mining_time, cooldown);
        let now = self.clock.now_secs();

        tracing::info!(last_mining_time, "Last mining time");

        if !is_eligible(now, last_mining_time, cooldown) {
            tracing::warn!(
                next_eligible_at = next,
                remaining = %format_remaining(next.saturating_sub(now)),
                "Mining already started, waiting for next window"
            );
            return Ok(CycleOutcome::Cooldown {
                last_mining_time,
                next_eligible_at: next,
            });
        }

        tracing::info!(wallet = %wallet.address, "Trying to start mining");
        let response = retry(&self.settings.retry, "start_mining", || api.start_mining(token))
            .await
            .map_err(WorkflowError::StartMining)?;
        metrics::record_mining_started();
        tracing::info!(response = %response, "Mining started");

        let activation = self.activate_on_chain(wallet).await;
        Ok(CycleOutcome::Mined { activation })
    }

    /// Nonce → signature → bearer token.
    pub async fn authenticate(&self, wallet: &WalletRecord) -> Result<Session, WorkflowError> {
        let api = &self.api;
        let address = wallet.address.as_str();

        let nonce = retry(&self.settings.retry, "generate_nonce", || api.generate_nonce(address))
            .await
            .map_err(WorkflowError::Nonce)?
            .into_data()
            .and_then(|data| data.nonce)
            .filter(|nonce| !nonce.is_empty())
            .ok_or(WorkflowError::MissingNonce)?;

        let signature = self.signer.sign_message(&nonce).await?;

        tracing::info!(wallet = %wallet.address, "Trying to login");
        let request = LoginRequest {
            address: wallet.address.clone(),
            invitation_code: self.settings.invitation_code.clone(),
            message: nonce.clone(),
            signature: signature.clone(),
        };
        let token = retry(&self.settings.retry, "login", || api.login(&request))
            .await
            .map_err(WorkflowError::Login)?
            .into_data()
            .and_then(|data| data.token)
            .filter(|token| !token.is_empty())
            .ok_or(WorkflowError::MissingToken)?;

        tracing::info!("Login successful");
        Ok(Session {
            nonce,
            signature,
            token,
        })
    }

    async fn report_user(&self, wallet: &WalletRecord, token: &str) {
        tracing::info!("Trying to check user info");
        let api = &self.api;
        match retry(&self.settings.retry, "user_info", || api.user_info(token)).await {
            Ok(envelope) => match envelope.into_data() {
                Some(info) => {
                    tracing::info!(
                        user_id = ?info.user_id,
                        twitter = ?info.twitter_handle,
                        total_reward = ?info.total_reward,
                        "User info"
                    );
                    if !info.has_linked_social() {
                        tracing::warn!(
                            wallet = %wallet.address,
                            "Wallet is not bound to a Twitter/X account"
                        );
                    }
                }
                None => tracing::error!(wallet = %wallet.address, "User info missing from response"),
            },
            Err(e) => tracing::error!(wallet = %wallet.address, error = %e, "Failed to get user data"),
        }
    }

    async fn activate_on_chain(&self, wallet: &WalletRecord) -> ActivationOutcome {
        tracing::info!(wallet = %wallet.address, "Trying to activate mining on-chain");
        match self.activator.activate().await {
            Ok(tx_hash) => {
                metrics::record_activation("confirmed");
                tracing::info!(tx_hash = %tx_hash, "On-chain activation confirmed");
                ActivationOutcome::Confirmed { tx_hash }
            }
            Err(BlockchainError::NotAvailable(reason)) => {
                metrics::record_activation("disabled");
                tracing::warn!(reason = %reason, "Skipping on-chain activation");
                ActivationOutcome::Disabled
            }
            Err(e) => {
                metrics::record_activation("failed");
                tracing::error!(
                    error = %e,
                    "Wallet already started mining today or does not have enough balance"
                );
                ActivationOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
