//! Chain client capability and client reuse

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use eth_rpc_client::{BlockId, CallRequest, ProviderConfig, RpcClient};
use tokio::sync::RwLock;
use tracing::info;

use crate::config::ResolverConfig;
use crate::error::TransportError;
use crate::types::ResolutionOptions;

/// The remote operations resolution needs from a chain
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Identifier of the chain this client talks to
    async fn chain_id(&self) -> Result<u64, TransportError>;

    /// Read-only contract call returning the raw hex result
    async fn call(
        &self,
        request: CallRequest,
        block: Option<BlockId>,
    ) -> Result<String, TransportError>;
}

#[async_trait]
impl ChainClient for RpcClient {
    async fn chain_id(&self) -> Result<u64, TransportError> {
        Ok(RpcClient::chain_id(self).await?)
    }

    async fn call(
        &self,
        request: CallRequest,
        block: Option<BlockId>,
    ) -> Result<String, TransportError> {
        Ok(RpcClient::call(self, &request, block).await?)
    }
}

/// Builds chain clients from provider settings
pub trait ClientFactory: Send + Sync {
    fn connect(&self, config: &ProviderConfig) -> Result<Arc<dyn ChainClient>, TransportError>;
}

/// Factory producing JSON-RPC over HTTP clients
#[derive(Debug, Clone)]
pub struct HttpClientFactory {
    timeout: Duration,
}

impl HttpClientFactory {
    /// Create a factory whose clients use `timeout` for every request
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for HttpClientFactory {
    fn default() -> Self {
        Self::new(ResolverConfig::default().rpc_timeout)
    }
}

impl ClientFactory for HttpClientFactory {
    fn connect(&self, config: &ProviderConfig) -> Result<Arc<dyn ChainClient>, TransportError> {
        let client = RpcClient::from_config(config, self.timeout)?;
        info!(url = client.url(), "Created JSON-RPC chain client");
        Ok(Arc::new(client))
    }
}

/// One constructed client per distinct provider config, kept for the registry's lifetime
pub struct ClientRegistry {
    factory: Arc<dyn ClientFactory>,
    clients: RwLock<HashMap<ProviderConfig, Arc<dyn ChainClient>>>,
}

impl ClientRegistry {
    /// Create an empty registry that builds clients with `factory`
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self {
            factory,
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// The caller's client if given, otherwise the shared client for its provider config
    pub async fn client_for(
        &self,
        options: &ResolutionOptions,
    ) -> Result<Arc<dyn ChainClient>, TransportError> {
        if let Some(ref client) = options.client {
            return Ok(client.clone());
        }

        if let Some(client) = self.clients.read().await.get(&options.provider) {
            return Ok(client.clone());
        }

        let mut clients = self.clients.write().await;
        // Another task may have connected while we waited for the write lock
        if let Some(client) = clients.get(&options.provider) {
            return Ok(client.clone());
        }

        let client = self.factory.connect(&options.provider)?;
        clients.insert(options.provider.clone(), client.clone());
        Ok(client)
    }

    /// Number of clients constructed so far
    pub async fn len(&self) -> usize {
        self.clients.read().await.len()
    }

    /// Whether no client has been constructed yet
    pub async fn is_empty(&self) -> bool {
        self.clients.read().await.is_empty()
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new(Arc::new(HttpClientFactory::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CountingFactory, ScriptedClient};

    #[tokio::test]
    async fn test_prebuilt_client_is_used_as_is() {
        let factory = Arc::new(CountingFactory::default());
        let registry = ClientRegistry::new(factory.clone());
        let client: Arc<dyn ChainClient> = Arc::new(ScriptedClient::new(1));
        let options = ResolutionOptions::new().with_client(client.clone());

        let resolved = registry.client_for(&options).await.unwrap();
        assert!(Arc::ptr_eq(&resolved, &client));
        assert_eq!(factory.connects(), 0);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_clients_reused_per_provider_config() {
        let factory = Arc::new(CountingFactory::default());
        let registry = ClientRegistry::new(factory.clone());
        let a = ResolutionOptions::new().with_provider(ProviderConfig::with_uri("http://a"));
        let b = ResolutionOptions::new().with_provider(ProviderConfig::with_uri("http://b"));

        let first = registry.client_for(&a).await.unwrap();
        let second = registry.client_for(&a).await.unwrap();
        let third = registry.client_for(&b).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(factory.connects(), 2);
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn test_block_and_ttl_do_not_affect_reuse() {
        let factory = Arc::new(CountingFactory::default());
        let registry = ClientRegistry::new(factory.clone());
        let provider = ProviderConfig::with_network("mainnet", None);

        registry
            .client_for(&ResolutionOptions::new().with_provider(provider.clone()))
            .await
            .unwrap();
        registry
            .client_for(
                &ResolutionOptions::new()
                    .with_provider(provider)
                    .at_block(10u64)
                    .with_ttl(Duration::from_secs(1)),
            )
            .await
            .unwrap();

        assert_eq!(factory.connects(), 1);
    }

    #[test]
    fn test_http_factory_default_timeout_matches_config() {
        assert_eq!(
            HttpClientFactory::default().timeout,
            ResolverConfig::default().rpc_timeout
        );
        assert_eq!(HttpClientFactory::default().timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_http_factory_rejects_missing_endpoint() {
        let factory = HttpClientFactory::default();
        let config = ProviderConfig::with_network("", None);
        assert!(factory.connect(&config).is_err());
    }
}
