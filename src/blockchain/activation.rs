//! On-chain mining activation.
//!
//! # Responsibilities
//! - Check the wallet can pay for the transaction
//! - Call `active()` on the mining contract, signed by the wallet
//! - Wait for the receipt and report reverts
//!
//! Every RPC call carries a deadline; a failure here never aborts the run.

use std::future::Future;
use std::time::Duration;

use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::config::BlockchainConfig;

sol! {
    #[sol(rpc)]
    contract MiningActivation {
        /// Records today's mining start for `msg.sender`.
        function active() external;
    }
}

/// Submits the transaction that starts mining on-chain.
pub trait MiningActivator {
    fn activate(&self) -> impl Future<Output = BlockchainResult<TxHash>> + Send;
}

/// Activator that talks to the configured contract over JSON-RPC.
pub struct ContractActivator {
    inner: Option<ContractClient>,
}

struct ContractClient {
    provider: DynProvider,
    contract: MiningActivation::MiningActivationInstance<DynProvider>,
    owner: Address,
    rpc_timeout: Duration,
    confirmation_timeout: Duration,
    min_balance: U256,
}

impl ContractActivator {
    /// Build an activator for `signer`. Returns a disabled activator when
    /// blockchain integration is switched off.
    pub fn new(config: &BlockchainConfig, signer: PrivateKeySigner) -> BlockchainResult<Self> {
        if !config.enabled {
            return Ok(Self::disabled());
        }

        let rpc_url: url::Url = config.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        let contract_address: Address = config.contract_address.parse().map_err(|e| {
            BlockchainError::InvalidAddress(format!("'{}': {}", config.contract_address, e))
        })?;

        let owner = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(signer)
            .with_chain_id(config.chain_id)
            .connect_http(rpc_url)
            .erased();
        let contract = MiningActivation::new(contract_address, provider.clone());

        Ok(Self {
            inner: Some(ContractClient {
                provider,
                contract,
                owner,
                rpc_timeout: Duration::from_secs(config.rpc_timeout_secs),
                confirmation_timeout: Duration::from_secs(config.confirmation_timeout_secs),
                min_balance: U256::from(config.min_balance_wei),
            }),
        })
    }

    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }
}

impl MiningActivator for ContractActivator {
    async fn activate(&self) -> BlockchainResult<TxHash> {
        let client = self.inner.as_ref().ok_or_else(|| {
            BlockchainError::NotAvailable("on-chain activation is disabled".to_string())
        })?;
        client.activate().await
    }
}

impl ContractClient {
    async fn activate(&self) -> BlockchainResult<TxHash> {
        let rpc_secs = self.rpc_timeout.as_secs();

        let balance = timeout(self.rpc_timeout, self.provider.get_balance(self.owner))
            .await
            .map_err(|_| BlockchainError::Timeout(rpc_secs))?
            .map_err(|e| BlockchainError::Rpc(e.to_string()))?;

        if balance <= self.min_balance {
            return Err(BlockchainError::InsufficientBalance {
                balance: balance.to_string(),
            });
        }

        let call = self.contract.active();
        let pending = timeout(self.rpc_timeout, call.send())
            .await
            .map_err(|_| BlockchainError::Timeout(rpc_secs))?
            .map_err(|e| BlockchainError::Rpc(e.to_string()))?;
        let tx_hash = *pending.tx_hash();

        tracing::info!(tx_hash = %tx_hash, owner = %self.owner, "Activation transaction sent");

        let receipt = timeout(self.confirmation_timeout, pending.get_receipt())
            .await
            .map_err(|_| BlockchainError::ConfirmationTimeout(self.confirmation_timeout.as_secs()))?
            .map_err(|e| BlockchainError::Rpc(e.to_string()))?;

        if !receipt.status() {
            return Err(BlockchainError::Reverted(tx_hash.to_string()));
        }

        tracing::debug!(
            tx_hash = %tx_hash,
            block_number = ?receipt.block_number,
            "Activation confirmed"
        );
        Ok(tx_hash)
    }
}

impl std::fmt::Debug for ContractActivator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("ContractActivator");
        match &self.inner {
            Some(client) => s
                .field("contract", client.contract.address())
                .field("owner", &client.owner)
                .finish(),
            None => s.field("enabled", &false).finish(),
        }
    }
}
