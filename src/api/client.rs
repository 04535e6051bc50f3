//! HTTP client for the reward API.
//!
//! # Responsibilities
//! - One `reqwest::Client` per wallet, optionally tunneled through its proxy
//! - Join relative paths onto the fixed base endpoint
//! - Send JSON, decode JSON, turn non-2xx into errors
//!
//! Retries live in the workflow, never here.

use std::future::Future;
use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::api::types::{
    Envelope, LoginData, LoginRequest, MinerStatus, NonceData, NonceRequest, UserInfo,
};
use crate::config::ApiConfig;

pub const GENERATE_NONCE_PATH: &str = "wallet/generateNonce";
pub const LOGIN_PATH: &str = "wallet/login";
pub const USER_INFO_PATH: &str = "user/getUserInfo";
pub const MINER_STATUS_PATH: &str = "assignment/totalMiningTime";
pub const START_MINING_PATH: &str = "assignment/startMining";

/// Errors talking to the reward API.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Invalid proxy: {0}")]
    InvalidProxy(String),

    #[error("Failed to build HTTP client: {0}")]
    Build(reqwest::Error),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The five endpoints the wallet workflow needs.
pub trait RewardApi {
    fn generate_nonce(
        &self,
        wallet_address: &str,
    ) -> impl Future<Output = Result<Envelope<NonceData>, NetworkError>> + Send;

    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl Future<Output = Result<Envelope<LoginData>, NetworkError>> + Send;

    fn user_info(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Envelope<UserInfo>, NetworkError>> + Send;

    fn miner_status(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Envelope<MinerStatus>, NetworkError>> + Send;

    fn start_mining(&self, token: &str) -> impl Future<Output = Result<Value, NetworkError>> + Send;
}

/// Transport shim over `reqwest`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client for `config.base_url`, routed through `proxy` when given.
    pub fn new(config: &ApiConfig, proxy: Option<&str>) -> Result<Self, NetworkError> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        builder = match proxy {
            Some(proxy_url) => {
                // Keep credentials out of the error message.
                let proxy = reqwest::Proxy::all(proxy_url)
                    .map_err(|e| NetworkError::InvalidProxy(e.to_string()))?;
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };

        let client = builder.build().map_err(NetworkError::Build)?;

        tracing::debug!(base_url = %base_url, proxied = proxy.is_some(), "API client created");

        Ok(Self { client, base_url })
    }

    /// Resolve a relative API path against the base endpoint.
    pub fn url(&self, path: &str) -> Result<Url, NetworkError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| NetworkError::InvalidUrl {
                url: path.to_string(),
                message: e.to_string(),
            })
    }

    /// POST a JSON body, optionally with a bearer token.
    pub async fn post<B, T>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<T, NetworkError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.client.post(self.url(path)?).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        send(request).await
    }

    /// GET with a bearer token.
    pub async fn get<T>(&self, path: &str, bearer: &str) -> Result<T, NetworkError>
    where
        T: DeserializeOwned,
    {
        let request = self.client.get(self.url(path)?).bearer_auth(bearer);
        send(request).await
    }
}

impl RewardApi for ApiClient {
    async fn generate_nonce(&self, wallet_address: &str) -> Result<Envelope<NonceData>, NetworkError> {
        let body = NonceRequest {
            wallet_address: wallet_address.to_string(),
        };
        self.post(GENERATE_NONCE_PATH, &body, None).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<Envelope<LoginData>, NetworkError> {
        self.post(LOGIN_PATH, request, None).await
    }

    async fn user_info(&self, token: &str) -> Result<Envelope<UserInfo>, NetworkError> {
        self.get(USER_INFO_PATH, token).await
    }

    async fn miner_status(&self, token: &str) -> Result<Envelope<MinerStatus>, NetworkError> {
        self.get(MINER_STATUS_PATH, token).await
    }

    async fn start_mining(&self, token: &str) -> Result<Value, NetworkError> {
        self.post(START_MINING_PATH, &serde_json::json!({}), Some(token))
            .await
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, NetworkError> {
    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(NetworkError::Status {
            status: status.as_u16(),
            body: text,
        });
    }

    Ok(serde_json::from_str(&text)?)
}

fn parse_base_url(raw: &str) -> Result<Url, NetworkError> {
    // Without a trailing slash `join` would replace the last path segment.
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).map_err(|e| NetworkError::InvalidUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        }
    }

    #[test]
    fn test_url_join() {
        let client = ApiClient::new(&config("https://api.example.com/v1"), None).unwrap();
        assert_eq!(
            client.url(GENERATE_NONCE_PATH).unwrap().as_str(),
            "https://api.example.com/v1/wallet/generateNonce"
        );
        assert_eq!(
            client.url("/user/getUserInfo").unwrap().as_str(),
            "https://api.example.com/v1/user/getUserInfo"
        );
    }

    #[test]
    fn test_default_base_url() {
        let client = ApiClient::new(&ApiConfig::default(), None).unwrap();
        assert_eq!(
            client.url(START_MINING_PATH).unwrap().as_str(),
            "https://lightmining-api.taker.xyz/assignment/startMining"
        );
    }

    #[test]
    fn test_proxy_accepted() {
        let client = ApiClient::new(&ApiConfig::default(), Some("socks5://127.0.0.1:9050"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_proxy_rejected() {
        let err = ApiClient::new(&ApiConfig::default(), Some("not a proxy url")).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidProxy(_)));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ApiClient::new(&config("::nope"), None).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidUrl { .. }));
    }
}
