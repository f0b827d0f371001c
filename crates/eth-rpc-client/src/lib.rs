//! Ethereum JSON-RPC Client
//!
//! A small HTTP client for the two read-only JSON-RPC methods needed to
//! query contracts: `eth_chainId` and `eth_call`. Also builds provider
//! endpoints from a URI or a named network plus an Infura credential.

mod client;
mod endpoint;
mod error;
mod types;

pub use client::{RpcClient, DEFAULT_TIMEOUT};
pub use endpoint::ProviderConfig;
pub use error::{Result, RpcError};
pub use types::{BlockId, CallRequest};
