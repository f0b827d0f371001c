use std::env;
use std::time::Duration;

use eth_rpc_client::{ProviderConfig, DEFAULT_TIMEOUT};

use crate::cache::{DEFAULT_MAX_TTL, DEFAULT_MIN_TTL};

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub min_ttl: Duration,
    pub max_ttl: Duration,
    pub rpc_timeout: Duration,
    /// Provider used when a call supplies neither a client nor provider settings
    pub provider: ProviderConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            min_ttl: DEFAULT_MIN_TTL,
            max_ttl: DEFAULT_MAX_TTL,
            rpc_timeout: DEFAULT_TIMEOUT,
            provider: ProviderConfig::default(),
        }
    }
}

impl ResolverConfig {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let secs = |key: &str| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
        };

        let min_ttl = secs("ENS_MIN_TTL_SECS").unwrap_or(defaults.min_ttl);
        let max_ttl = secs("ENS_MAX_TTL_SECS").unwrap_or(defaults.max_ttl);
        let rpc_timeout = secs("ETH_RPC_TIMEOUT_SECS").unwrap_or(defaults.rpc_timeout);

        let provider = ProviderConfig {
            uri: lookup("ETH_RPC_URL"),
            network: lookup("ETH_NETWORK"),
            credential: lookup("INFURA_KEY"),
        };

        Self {
            min_ttl,
            max_ttl,
            rpc_timeout,
            provider,
        }
    }
}
