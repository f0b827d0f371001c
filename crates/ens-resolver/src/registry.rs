//! Well-known ENS registry contract per chain

use std::collections::HashMap;

use alloy_primitives::{address, Address};

/// The ENS registry is deployed at the same address on every listed network
pub const ENS_REGISTRY: Address = address!("00000000000C2E074eC69A0dFb2997BA6C7d2e1e");

/// ENS registry address for a chain, if ENS is deployed there
pub fn registry_address(chain_id: u64) -> Option<Address> {
    ENS_REGISTRIES.get(&chain_id).copied()
}

/// Chain identifiers with a known registry, ascending
pub fn supported_chains() -> Vec<u64> {
    let mut chains: Vec<u64> = ENS_REGISTRIES.keys().copied().collect();
    chains.sort_unstable();
    chains
}

lazy_static::lazy_static! {
    static ref ENS_REGISTRIES: HashMap<u64, Address> = {
        let mut m = HashMap::new();
        // mainnet, ropsten, rinkeby, kovan, 6824
        for chain_id in [1, 3, 4, 42, 6824] {
            m.insert(chain_id, ENS_REGISTRY);
        }
        m
    };
}
