//! EIP-137 namehash
//!
//! `namehash("")` is 32 zero bytes; every label, from the top-level label
//! down to the leaf, folds into the accumulator as
//! `keccak256(node || keccak256(label))`. Empty labels are skipped.

use alloy_primitives::{hex, keccak256, B256};

use crate::error::{EnsError, Result};

/// Compute the node for a name
pub fn namehash(name: &str) -> B256 {
    let mut node = B256::ZERO;
    for label in name.rsplit('.').filter(|label| !label.is_empty()) {
        let label_hash = keccak256(label.as_bytes());
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(node.as_slice());
        buf[32..].copy_from_slice(label_hash.as_slice());
        node = keccak256(buf);
    }
    node
}

/// Compute the node for a name given as raw bytes, which must be UTF-8 text
pub fn namehash_bytes(name: &[u8]) -> Result<B256> {
    let name = std::str::from_utf8(name)
        .map_err(|e| EnsError::InvalidInput(format!("ENS name must be a string: {e}")))?;
    Ok(namehash(name))
}

/// Compute the node for a name as a `0x`-prefixed hex string
pub fn hash(name: &str) -> String {
    hex::encode_prefixed(namehash(name).as_slice())
}
