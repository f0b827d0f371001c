//! Error types for the JSON-RPC client

use std::fmt;

/// Errors that can occur when talking to an Ethereum node
#[derive(Debug)]
pub enum RpcError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// Failed to encode or parse a JSON payload
    Json(serde_json::Error),
    /// The node answered with a JSON-RPC error object
    Rpc { code: i64, message: String },
    /// The node answered with something that is not a usable result
    InvalidResponse(String),
    /// Neither a URI nor a network name was available to build an endpoint
    MissingEndpoint,
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "JSON-RPC HTTP error: {e}"),
            Self::Json(e) => write!(f, "JSON-RPC encoding error: {e}"),
            Self::Rpc { code, message } => write!(f, "JSON-RPC error {code}: {message}"),
            Self::InvalidResponse(msg) => write!(f, "Invalid JSON-RPC response: {msg}"),
            Self::MissingEndpoint => write!(f, "No provider URI or network configured"),
        }
    }
}

impl std::error::Error for RpcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RpcError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Result type for JSON-RPC operations
pub type Result<T> = std::result::Result<T, RpcError>;
