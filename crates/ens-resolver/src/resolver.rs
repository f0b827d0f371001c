use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, B256};
use eth_rpc_client::{BlockId, CallRequest, ProviderConfig};
use tracing::{debug, warn};

use crate::address::{parse_address_literal, to_checksum};
use crate::cache::ResolutionCache;
use crate::client::{ChainClient, ClientRegistry, HttpClientFactory};
use crate::codec::{
    decode_address, decode_u64, encode_call, Selector, ADDR_SELECTOR, RESOLVER_SELECTOR,
    TTL_SELECTOR,
};
use crate::config::ResolverConfig;
use crate::error::{EnsError, Result};
use crate::namehash::namehash;
use crate::registry::registry_address;
use crate::types::ResolutionOptions;

/// Resolves ENS names to checksummed addresses, caching results per chain
pub struct EnsResolver {
    cache: Arc<ResolutionCache>,
    clients: ClientRegistry,
    default_provider: ProviderConfig,
}

impl EnsResolver {
    /// Create a resolver with default settings
    pub fn new() -> Self {
        Self::from_config(&ResolverConfig::default())
    }

    /// Create a resolver with TTL bounds, RPC timeout and default provider from `config`
    pub fn from_config(config: &ResolverConfig) -> Self {
        let cache = ResolutionCache::new();
        cache.set_min_ttl(config.min_ttl);
        cache.set_max_ttl(config.max_ttl);

        let clients = ClientRegistry::new(Arc::new(HttpClientFactory::new(config.rpc_timeout)));

        Self::with_parts(Arc::new(cache), clients).with_default_provider(config.provider.clone())
    }

    /// Assemble a resolver around an existing cache and client registry
    pub fn with_parts(cache: Arc<ResolutionCache>, clients: ClientRegistry) -> Self {
        Self {
            cache,
            clients,
            default_provider: ProviderConfig::default(),
        }
    }

    /// Provider used when a call gives neither a client nor provider settings
    pub fn with_default_provider(mut self, provider: ProviderConfig) -> Self {
        self.default_provider = provider;
        self
    }

    /// The shared resolution cache
    pub fn cache(&self) -> &Arc<ResolutionCache> {
        &self.cache
    }

    /// The chain clients constructed so far
    pub fn clients(&self) -> &ClientRegistry {
        &self.clients
    }

    /// Resolve a name (or address literal) to a checksummed address
    pub async fn resolve(&self, name: &str, options: &ResolutionOptions) -> Result<String> {
        let name = name.to_lowercase();

        if let Some(address) = parse_address_literal(&name) {
            return Ok(to_checksum(&address));
        }

        let client = self.client(options).await?;
        let node = namehash(&name);

        let chain_id = client.chain_id().await?;
        let registry = registry_address(chain_id).ok_or(EnsError::UnsupportedNetwork(chain_id))?;

        if options.block.is_none() {
            if let Some(entry) = self.cache.get(chain_id, &node).await {
                return Ok(to_checksum(&entry.address));
            }
        }

        debug!(name = %name, chain_id, "Looking up ENS resolver");
        let raw = call(client.as_ref(), registry, RESOLVER_SELECTOR, &node, options.block).await?;
        let resolver = decode_address(&raw)
            .filter(|resolver| !resolver.is_zero())
            .ok_or_else(|| EnsError::NoResolver(name.clone()))?;

        debug!(name = %name, %resolver, "Querying ENS resolver for address");
        let raw = call(client.as_ref(), resolver, ADDR_SELECTOR, &node, options.block).await?;
        let address = decode_address(&raw).ok_or_else(|| EnsError::ResolutionFailed(name.clone()))?;

        let ttl = match options.ttl {
            Some(ttl) => Some(ttl),
            None => self.remote_ttl(client.as_ref(), registry, &node, options.block).await?,
        };

        if let Some(ttl) = ttl {
            if !ttl.is_zero() && options.block.is_none() {
                self.cache.insert_with_ttl(chain_id, &node, address, ttl).await;
            }
        }

        Ok(to_checksum(&address))
    }

    async fn client(&self, options: &ResolutionOptions) -> Result<Arc<dyn ChainClient>> {
        if options.client.is_none() && options.provider == ProviderConfig::default() {
            let defaulted = options
                .clone()
                .with_provider(self.default_provider.clone());
            return Ok(self.clients.client_for(&defaulted).await?);
        }
        Ok(self.clients.client_for(options).await?)
    }

    /// Registry TTL for the node, clamped; `None` when the record is unreadable
    async fn remote_ttl(
        &self,
        client: &dyn ChainClient,
        registry: Address,
        node: &B256,
        block: Option<BlockId>,
    ) -> Result<Option<Duration>> {
        let raw = call(client, registry, TTL_SELECTOR, node, block).await?;
        let Some(secs) = decode_u64(&raw) else {
            warn!(%node, raw = %raw, "Registry returned an undecodable TTL, not caching");
            return Ok(None);
        };

        let ttl = Duration::from_millis(secs.saturating_mul(1000));
        Ok(Some(self.cache.clamp_ttl(ttl)))
    }
}

impl Default for EnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

async fn call(
    client: &dyn ChainClient,
    to: Address,
    selector: Selector,
    node: &B256,
    block: Option<BlockId>,
) -> Result<String> {
    let request = CallRequest::new(to, encode_call(selector, node));
    Ok(client.call(request, block).await?)
}
