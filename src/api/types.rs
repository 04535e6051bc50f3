//! Wire types for the reward API.
//!
//! Every response is wrapped in a `{ "data": ... }` envelope. Fields are
//! optional because the server omits them on partial failures; callers must
//! check before using them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Standard response envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data: Some(data) }
    }

    pub fn empty() -> Self {
        Self { data: None }
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// Body of `POST wallet/generateNonce`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonceRequest {
    pub wallet_address: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NonceData {
    #[serde(default)]
    pub nonce: Option<String>,
}

/// Body of `POST wallet/login`. `message` carries the signed nonce.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub address: String,
    pub invitation_code: String,
    pub message: String,
    pub signature: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoginData {
    #[serde(default)]
    pub token: Option<String>,
}

/// Read-only projection of the account, used for logging.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub user_id: Option<Value>,
    /// Linked X/Twitter handle, absent when no account is bound.
    #[serde(default, rename = "twName")]
    pub twitter_handle: Option<String>,
    #[serde(default)]
    pub total_reward: Option<Value>,
}

impl UserInfo {
    pub fn has_linked_social(&self) -> bool {
        self.twitter_handle
            .as_deref()
            .is_some_and(|handle| !handle.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinerStatus {
    /// Unix seconds of the last recorded mining start.
    #[serde(default)]
    pub last_mining_time: Option<u64>,
}

impl MinerStatus {
    /// Last mining time, with a missing value meaning "never".
    pub fn last_mining_time_or_epoch(&self) -> u64 {
        self.last_mining_time.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_wire_names() {
        let body = LoginRequest {
            address: "0xabc".into(),
            invitation_code: "XX89R".into(),
            message: "abc123".into(),
            signature: "0xsig".into(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["invitationCode"], "XX89R");
        assert_eq!(json["message"], "abc123");
        assert_eq!(json["signature"], "0xsig");

        let nonce = serde_json::to_value(NonceRequest {
            wallet_address: "0xabc".into(),
        })
        .unwrap();
        assert_eq!(nonce["walletAddress"], "0xabc");
    }

    #[test]
    fn test_partial_envelopes() {
        let env: Envelope<NonceData> = serde_json::from_str(r#"{"code":500}"#).unwrap();
        assert!(env.data.is_none());

        let env: Envelope<NonceData> = serde_json::from_str(r#"{"data":{}}"#).unwrap();
        assert!(env.data.unwrap().nonce.is_none());

        let env: Envelope<MinerStatus> =
            serde_json::from_str(r#"{"data":{"lastMiningTime":null}}"#).unwrap();
        assert_eq!(env.data.unwrap().last_mining_time_or_epoch(), 0);
    }

    #[test]
    fn test_user_info() {
        let env: Envelope<UserInfo> = serde_json::from_str(
            r#"{"data":{"userId":42,"twName":"miner","totalReward":"12.5"}}"#,
        )
        .unwrap();
        let info = env.data.unwrap();
        assert!(info.has_linked_social());
        assert_eq!(info.user_id, Some(Value::from(42)));

        let info: UserInfo = serde_json::from_str(r#"{"userId":1,"twName":""}"#).unwrap();
        assert!(!info.has_linked_social());
    }
}
