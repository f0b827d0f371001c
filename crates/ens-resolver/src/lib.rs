//! ENS Name Resolver
//!
//! Resolves ENS names to checksummed Ethereum addresses. A name is hashed
//! into its node, the chain's ENS registry is asked for the node's resolver,
//! and the resolver is asked for the address. Results are cached per chain
//! for the registry's TTL, clamped to configurable bounds.
//!
//! # Example
//!
//! ```no_run
//! use ens_resolver::{EnsResolver, ProviderConfig, ResolutionOptions};
//!
//! # async fn example() -> Result<(), ens_resolver::EnsError> {
//! let resolver = EnsResolver::new();
//! let options = ResolutionOptions::new()
//!     .with_provider(ProviderConfig::with_uri("http://localhost:8545"));
//!
//! let address = resolver.resolve("vitalik.eth", &options).await?;
//! println!("{address}");
//! # Ok(())
//! # }
//! ```

mod address;
mod cache;
mod client;
mod clock;
mod codec;
mod config;
mod error;
mod namehash;
mod registry;
mod resolver;
mod types;

#[cfg(test)]
mod testing;

pub use address::{parse_address_literal, to_checksum};
pub use cache::{ResolutionCache, DEFAULT_MAX_TTL, DEFAULT_MIN_TTL};
pub use client::{ChainClient, ClientFactory, ClientRegistry, HttpClientFactory};
pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::{
    decode_address, decode_u64, decode_word, encode_call, Selector, ADDR_SELECTOR,
    RESOLVER_SELECTOR, TTL_SELECTOR,
};
pub use config::ResolverConfig;
pub use error::{EnsError, Result, TransportError};
pub use namehash::{hash, namehash, namehash_bytes};
pub use registry::{registry_address, supported_chains, ENS_REGISTRY};
pub use resolver::EnsResolver;
pub use types::{CacheEntry, CacheStats, ResolutionOptions};

pub use eth_rpc_client::{BlockId, CallRequest, ProviderConfig, RpcClient, RpcError};
