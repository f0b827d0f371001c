//! Provider endpoint construction

use crate::error::{Result, RpcError};

const DEFAULT_NETWORK: &str = "mainnet";

/// How to reach an Ethereum node when no client is supplied
///
/// Equal configs always map to the same endpoint, so the struct doubles
/// as a key for reusing constructed clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProviderConfig {
    /// Explicit JSON-RPC URI; takes precedence over `network`
    pub uri: Option<String>,
    /// Named network served by Infura (`mainnet`, `ropsten`, ...)
    pub network: Option<String>,
    /// Infura project credential
    pub credential: Option<String>,
}

impl ProviderConfig {
    /// Config pointing at an explicit JSON-RPC URI
    pub fn with_uri(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            ..Self::default()
        }
    }

    /// Config pointing at a named Infura network
    pub fn with_network(network: impl Into<String>, credential: Option<String>) -> Self {
        Self {
            uri: None,
            network: Some(network.into()),
            credential,
        }
    }

    /// Resolve the HTTP endpoint this config points at
    pub fn endpoint(&self) -> Result<String> {
        if let Some(ref uri) = self.uri {
            return Ok(uri.clone());
        }

        let network = canonical_network(self.network.as_deref().unwrap_or(DEFAULT_NETWORK));
        if network.is_empty() {
            return Err(RpcError::MissingEndpoint);
        }

        Ok(match self.credential.as_deref() {
            Some(key) if !key.is_empty() => format!("https://{network}.infura.io/v3/{key}"),
            _ => format!("https://{network}.infura.io"),
        })
    }
}

fn canonical_network(name: &str) -> String {
    match name.trim().to_lowercase().as_str() {
        "main" | "homestead" => DEFAULT_NETWORK.to_string(),
        other => other.to_string(),
    }
}
