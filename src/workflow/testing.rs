//! In-memory fakes for workflow and runner tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use alloy::primitives::TxHash;
use serde_json::Value;

use crate::api::types::{Envelope, LoginData, LoginRequest, MinerStatus, NonceData, UserInfo};
use crate::api::{NetworkError, RewardApi};
use crate::blockchain::{BlockchainError, BlockchainResult, MessageSigner, MiningActivator, SigningError};

fn unavailable() -> NetworkError {
    NetworkError::Status {
        status: 503,
        body: "Service Unavailable".to_string(),
    }
}

/// Scriptable reward API that records every call.
#[derive(Default)]
pub struct FakeApi {
    pub nonce: Option<String>,
    pub token: Option<String>,
    pub last_mining_time: Option<u64>,
    /// Number of leading generate_nonce attempts that fail.
    pub fail_nonce: u32,
    pub fail_login: bool,
    pub fail_user_info: bool,
    pub fail_miner_status: bool,
    /// Answer miner_status with an envelope lacking `data`.
    pub empty_miner_status: bool,
    pub fail_start_mining: bool,
    nonce_attempts: AtomicU32,
    calls: Mutex<Vec<&'static str>>,
    tokens: Mutex<Vec<String>>,
    last_login: Mutex<Option<LoginRequest>>,
}

impl FakeApi {
    pub fn healthy(nonce: &str, token: &str, last_mining_time: Option<u64>) -> Self {
        Self {
            nonce: Some(nonce.to_string()),
            token: Some(token.to_string()),
            last_mining_time,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn tokens_seen(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }

    pub fn last_login(&self) -> Option<LoginRequest> {
        self.last_login.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn record_token(&self, token: &str) {
        self.tokens.lock().unwrap().push(token.to_string());
    }
}

impl RewardApi for FakeApi {
    async fn generate_nonce(&self, _wallet_address: &str) -> Result<Envelope<NonceData>, NetworkError> {
        self.record("generate_nonce");
        let attempt = self.nonce_attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.fail_nonce {
            return Err(unavailable());
        }
        Ok(Envelope::new(NonceData {
            nonce: self.nonce.clone(),
        }))
    }

    async fn login(&self, request: &LoginRequest) -> Result<Envelope<LoginData>, NetworkError> {
        self.record("login");
        *self.last_login.lock().unwrap() = Some(request.clone());
        if self.fail_login {
            return Err(unavailable());
        }
        Ok(Envelope::new(LoginData {
            token: self.token.clone(),
        }))
    }

    async fn user_info(&self, token: &str) -> Result<Envelope<UserInfo>, NetworkError> {
        self.record("user_info");
        self.record_token(token);
        if self.fail_user_info {
            return Err(unavailable());
        }
        Ok(Envelope::new(UserInfo {
            user_id: Some(Value::from(7)),
            twitter_handle: None,
            total_reward: Some(Value::from("0")),
        }))
    }

    async fn miner_status(&self, token: &str) -> Result<Envelope<MinerStatus>, NetworkError> {
        self.record("miner_status");
        self.record_token(token);
        if self.fail_miner_status {
            return Err(unavailable());
        }
        if self.empty_miner_status {
            return Ok(Envelope::empty());
        }
        Ok(Envelope::new(MinerStatus {
            last_mining_time: self.last_mining_time,
        }))
    }

    async fn start_mining(&self, token: &str) -> Result<Value, NetworkError> {
        self.record("start_mining");
        self.record_token(token);
        if self.fail_start_mining {
            return Err(unavailable());
        }
        Ok(serde_json::json!({ "code": 200 }))
    }
}

/// Signer returning a canned signature.
pub struct FakeSigner {
    signature: Option<String>,
}

impl FakeSigner {
    pub fn ok(signature: &str) -> Self {
        Self {
            signature: Some(signature.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { signature: None }
    }
}

impl MessageSigner for FakeSigner {
    async fn sign_message(&self, _message: &str) -> Result<String, SigningError> {
        self.signature
            .clone()
            .ok_or_else(|| SigningError::Sign("key unavailable".to_string()))
    }
}

#[derive(Clone, Copy)]
enum ActivationMode {
    Confirm,
    Fail,
    Disabled,
}

/// Activator counting how often it was invoked.
pub struct FakeActivator {
    mode: ActivationMode,
    calls: AtomicU32,
}

impl FakeActivator {
    fn with_mode(mode: ActivationMode) -> Self {
        Self {
            mode,
            calls: AtomicU32::new(0),
        }
    }

    pub fn ok() -> Self {
        Self::with_mode(ActivationMode::Confirm)
    }

    pub fn failing() -> Self {
        Self::with_mode(ActivationMode::Fail)
    }

    pub fn disabled() -> Self {
        Self::with_mode(ActivationMode::Disabled)
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MiningActivator for FakeActivator {
    async fn activate(&self) -> BlockchainResult<TxHash> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            ActivationMode::Confirm => Ok(TxHash::repeat_byte(0xab)),
            ActivationMode::Fail => Err(BlockchainError::InsufficientBalance {
                balance: "0".to_string(),
            }),
            ActivationMode::Disabled => Err(BlockchainError::NotAvailable("disabled".to_string())),
        }
    }
}
