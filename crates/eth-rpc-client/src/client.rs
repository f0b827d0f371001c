use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde_json::{json, Value};
use tracing::debug;

use crate::endpoint::ProviderConfig;
use crate::error::{Result, RpcError};
use crate::types::{BlockId, CallRequest, JsonRpcRequest, JsonRpcResponse};

/// Request timeout used when none is given
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-RPC client for a single Ethereum node
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Create a client with the default 30 second timeout
    pub fn new(url: &str) -> Result<Self> {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            url: url.to_string(),
            next_id: AtomicU64::new(1),
        })
    }

    /// Create a client for the endpoint described by a provider config
    pub fn from_config(config: &ProviderConfig, timeout: Duration) -> Result<Self> {
        Self::with_timeout(&config.endpoint()?, timeout)
    }

    /// Endpoint this client sends requests to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the chain identifier of the connected network
    pub async fn chain_id(&self) -> Result<u64> {
        let result = self.request("eth_chainId", json!([])).await?;
        let quantity = result
            .as_str()
            .ok_or_else(|| RpcError::InvalidResponse(format!("expected hex quantity, got {result}")))?;
        parse_quantity(quantity)
    }

    /// Execute a read-only call, returning the raw hex result
    pub async fn call(&self, request: &CallRequest, block: Option<BlockId>) -> Result<String> {
        let block = block.unwrap_or_default();
        let params = json!([request.to_params(), block.to_param()]);
        let result = self.request("eth_call", params).await?;

        match result {
            Value::String(raw) => Ok(raw),
            other => Err(RpcError::InvalidResponse(format!(
                "expected hex data, got {other}"
            ))),
        }
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        debug!(url = %self.url, method, id, "Sending JSON-RPC request");

        let response = self.http.post(&self.url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(RpcError::InvalidResponse(format!(
                "node returned status {}",
                response.status()
            )));
        }

        let text = response.text().await?;
        let data: JsonRpcResponse = serde_json::from_str(&text)?;

        if let Some(ref response_id) = data.id {
            if *response_id != Value::from(id) {
                return Err(RpcError::InvalidResponse(format!(
                    "response id {response_id} does not match request id {id}"
                )));
            }
        }

        if let Some(err) = data.error {
            return Err(RpcError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        data.result
            .ok_or_else(|| RpcError::InvalidResponse("missing result".to_string()))
    }
}

/// Parse a `0x`-prefixed hex quantity
fn parse_quantity(quantity: &str) -> Result<u64> {
    let digits = quantity
        .strip_prefix("0x")
        .ok_or_else(|| RpcError::InvalidResponse(format!("quantity without 0x prefix: {quantity}")))?;
    u64::from_str_radix(digits, 16)
        .map_err(|e| RpcError::InvalidResponse(format!("bad quantity {quantity}: {e}")))
}
