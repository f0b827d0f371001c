//! Error types for ENS resolution

use std::fmt;

/// Failure reported by a chain client, propagated unmodified
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while hashing or resolving a name
#[derive(Debug)]
pub enum EnsError {
    /// The name was not valid text
    InvalidInput(String),
    /// The connected chain has no known ENS registry
    UnsupportedNetwork(u64),
    /// The registry has no usable resolver for the name
    NoResolver(String),
    /// The resolver returned something that is not an address
    ResolutionFailed(String),
    /// The chain client failed
    Transport(TransportError),
}

impl fmt::Display for EnsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "Invalid ENS name: {msg}"),
            Self::UnsupportedNetwork(id) => write!(f, "ENS is not supported on network id {id}"),
            Self::NoResolver(name) => write!(f, "No resolver for ENS address: '{name}'"),
            Self::ResolutionFailed(name) => write!(f, "Failed to resolve ENS address: '{name}'"),
            Self::Transport(e) => write!(f, "Chain client error: {e}"),
        }
    }
}

impl std::error::Error for EnsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<TransportError> for EnsError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl From<eth_rpc_client::RpcError> for EnsError {
    fn from(e: eth_rpc_client::RpcError) -> Self {
        Self::Transport(Box::new(e))
    }
}

pub type Result<T> = std::result::Result<T, EnsError>;
