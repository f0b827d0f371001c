use alloy_primitives::{hex, Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Block selector for `eth_call`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockId {
    #[default]
    Latest,
    Earliest,
    Pending,
    Number(u64),
    Hash(B256),
}

impl BlockId {
    /// The JSON-RPC block parameter for this selector
    pub fn to_param(&self) -> String {
        match self {
            Self::Latest => "latest".to_string(),
            Self::Earliest => "earliest".to_string(),
            Self::Pending => "pending".to_string(),
            Self::Number(n) => format!("0x{n:x}"),
            Self::Hash(h) => hex::encode_prefixed(h.as_slice()),
        }
    }
}

impl From<u64> for BlockId {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

/// A read-only contract call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

impl CallRequest {
    /// Build a call with zero value attached
    pub fn new(to: Address, data: Bytes) -> Self {
        Self {
            to,
            data,
            value: U256::ZERO,
        }
    }

    pub(crate) fn to_params(&self) -> CallParams {
        CallParams {
            to: hex::encode_prefixed(self.to.as_slice()),
            data: hex::encode_prefixed(&self.data),
            value: format!("0x{:x}", self.value),
        }
    }
}

/// Wire form of a call object
#[derive(Debug, Serialize)]
pub(crate) struct CallParams {
    pub(crate) to: String,
    pub(crate) data: String,
    pub(crate) value: String,
}

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Serialize)]
pub(crate) struct JsonRpcRequest<'a> {
    pub(crate) jsonrpc: &'static str,
    pub(crate) id: u64,
    pub(crate) method: &'a str,
    pub(crate) params: Value,
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct JsonRpcResponse {
    pub(crate) id: Option<Value>,
    pub(crate) result: Option<Value>,
    pub(crate) error: Option<JsonRpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JsonRpcErrorObject {
    pub(crate) code: i64,
    pub(crate) message: String,
}
