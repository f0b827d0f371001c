use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use eth_rpc_client::{BlockId, ProviderConfig};
use serde::{Deserialize, Serialize};

use crate::client::ChainClient;

/// A resolved address and when it stops being trusted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub address: Address,
    pub expires: DateTime<Utc>,
}

impl CacheEntry {
    /// Whether the entry may still be trusted at `now`
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires
    }
}

/// Statistics about the resolution cache
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Per-call resolution options
#[derive(Clone, Default)]
pub struct ResolutionOptions {
    /// Pre-built chain client; when set, `provider` is ignored
    pub client: Option<Arc<dyn ChainClient>>,
    /// How to build a client when none is given
    pub provider: ProviderConfig,
    /// Pin every contract call to this block; disables caching
    pub block: Option<BlockId>,
    /// Cache lifetime to use instead of the registry's TTL record
    pub ttl: Option<Duration>,
}

impl ResolutionOptions {
    /// Options with nothing set: build a client from the default provider, query the latest block
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse a pre-built chain client
    pub fn with_client(mut self, client: Arc<dyn ChainClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Build (or reuse) a client for these provider settings
    pub fn with_provider(mut self, provider: ProviderConfig) -> Self {
        self.provider = provider;
        self
    }

    /// Pin every call to a historical block; the result is not cached
    pub fn at_block(mut self, block: impl Into<BlockId>) -> Self {
        self.block = Some(block.into());
        self
    }

    /// Cache for `ttl` instead of reading the registry's TTL record
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

impl fmt::Debug for ResolutionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionOptions")
            .field("client", &self.client.as_ref().map(|_| "<client>"))
            .field("provider", &self.provider)
            .field("block", &self.block)
            .field("ttl", &self.ttl)
            .finish()
    }
}
